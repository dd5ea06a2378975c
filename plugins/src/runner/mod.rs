pub mod shell;
mod utf8;

pub use shell::ShellRunner;
