mod html;
mod jsonl;
mod terminal;
mod text;

pub use html::HtmlPanel;
pub use jsonl::JsonlPanel;
pub use terminal::TerminalPanel;
pub use text::html_to_text;
