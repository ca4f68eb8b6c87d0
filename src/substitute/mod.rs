//! Run-preserving placeholder substitution.
//!
//! A token may be split across any number of runs, each with its own
//! formatting. Substitution works on the concatenated paragraph text to
//! find a match, then maps the matched characters back to their runs:
//!
//! 1. [`RunIndex`] maps each paragraph character to `(run, offset)`.
//! 2. [`TokenLocator`] finds the leftmost literal match.
//! 3. [`RunRewriter`] puts the value into the first touched run and removes
//!    the matched characters from the others.
//! 4. [`ParagraphSubstitutor`] repeats until the token is gone.
//!
//! # Example
//!
//! ```
//! use docfill::model::{Paragraph, Run};
//! use docfill::substitute::ParagraphSubstitutor;
//!
//! let mut p = Paragraph::with_runs(vec![Run::new("Hello {{na"), Run::new("me}} !")]);
//! ParagraphSubstitutor::new().substitute(&mut p, "{{name}}", "World")?;
//! assert_eq!(p.runs[0].text, "Hello World");
//! assert_eq!(p.runs[1].text, " !");
//! # Ok::<(), docfill::Error>(())
//! ```

mod locator;
mod paragraph;
mod rewriter;
mod run_index;
mod substitutions;

pub use locator::TokenLocator;
pub use paragraph::{ParagraphSubstitutor, DEFAULT_MAX_REPLACEMENTS};
pub use rewriter::RunRewriter;
pub use run_index::{RunIndex, RunSpan};
pub use substitutions::{Substitutions, TemplateValue};
