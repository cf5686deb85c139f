pub mod break_even;
pub mod impermanent_loss;
pub mod projection;
pub mod returns;
pub mod risk;
