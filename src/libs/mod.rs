// Core building blocks shared by the commands and installers.

pub mod command_name;
pub mod envrc;
pub mod errors;
pub mod paths;
pub mod process;
pub mod script;
