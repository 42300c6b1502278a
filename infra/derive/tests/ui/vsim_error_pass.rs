use std::borrow::Cow;
use vsim_derive::vsim_error;

#[vsim_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<String, DemoError> {
    let text = std::fs::read_to_string("/nonexistent").context("reading demo")?;
    if text.is_empty() {
        return Err("empty file".into());
    }
    Ok(text)
}

fn main() {
    let _ = read();
}
