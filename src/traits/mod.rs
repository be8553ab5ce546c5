pub mod command;
pub mod filesystem;
pub mod input;
pub mod output;

pub use command::{CommandExecutor, RealCommandExecutor};
pub use filesystem::{FileSystem, RealFileSystem};
pub use input::{InputSource, StdinInput};
pub use output::{Output, QuietOutput, TerminalOutput};

#[cfg(test)]
pub use command::{MockCommandExecutor, MockCommandResult};
#[cfg(test)]
pub use filesystem::MockFileSystem;
#[cfg(test)]
pub use input::MockInput;
#[cfg(test)]
pub use output::{MockOutput, OutputMessage};
