pub mod salvage;

pub use salvage::{SalvageCommand, SalvageOptions, SelectionMode};
