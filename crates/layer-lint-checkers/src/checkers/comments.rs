//! Cross-cutting comment and docstring checker (every Python file).

use crate::checker::Checker;
use crate::rules::comments::{
    DocstringDiscipline, DocstringRestatesSignature, NoBannerComments, NoTrivialInlineComments,
};

/// Checks that prose earns its keep: short single-sentence docstrings,
/// no banner art, no comments that restate the code next to them.
#[must_use]
pub fn comments_checker() -> Checker {
    Checker::new("comments")
        .scan_all()
        .with_file_group(
            "docstrings",
            vec![
                Box::new(DocstringDiscipline::default()),
                Box::new(DocstringRestatesSignature::default()),
            ],
        )
        .with_file_group("banners", vec![Box::new(NoBannerComments)])
        .with_file_group("inline", vec![Box::new(NoTrivialInlineComments::default())])
}
