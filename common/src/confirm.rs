//! Yes/no decisions for destructive operations.
//!
//! The store asks a [`Confirm`] implementation before overwriting or deleting
//! anything. The browser answers with `window.confirm`, tests answer with
//! [`Accept`] or [`Decline`] or a closure that records the prompts it saw.

use std::fmt;

/// The destructive action awaiting a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    OverwriteTemplate { name: String },
    DeleteTemplate { name: String },
    ResetAll,
}

impl Prompt {
    /// Message shown to the user, in the application's language.
    pub fn message(&self) -> String {
        match self {
            Prompt::OverwriteTemplate { .. } => {
                "შაბლონი იმავე სახელით უკვე არსებობს — ჩაანაცვლოთ?".to_string()
            }
            Prompt::DeleteTemplate { name } => {
                format!("გინდა მართლა წაიშალოს შაბლონი: {}?", name)
            }
            Prompt::ResetAll => {
                "შეგნებულად გსურთ ყველა მონაცემის (შაბლონები/ხელმოწერები/ლოგო) წაშლა?".to_string()
            }
        }
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::OverwriteTemplate { name } => write!(f, "overwrite template `{}`", name),
            Prompt::DeleteTemplate { name } => write!(f, "delete template `{}`", name),
            Prompt::ResetAll => f.write_str("reset all stored data"),
        }
    }
}

pub trait Confirm {
    fn confirm(&mut self, prompt: &Prompt) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&Prompt) -> bool,
{
    fn confirm(&mut self, prompt: &Prompt) -> bool {
        self(prompt)
    }
}

/// Always says yes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accept;

impl Confirm for Accept {
    fn confirm(&mut self, _prompt: &Prompt) -> bool {
        true
    }
}

/// Always says no.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decline;

impl Confirm for Decline {
    fn confirm(&mut self, _prompt: &Prompt) -> bool {
        false
    }
}
