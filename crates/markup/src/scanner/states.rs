//! Scanner state machine definitions.
//!
//! One variant per lexical mode the scanner can be suspended in at a chunk
//! boundary. `AttrValueUnquotedSlash` exists so a `/` at the end of a chunk
//! does not need lookahead to decide between value content and `/>`.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScanState {
    Data,
    TagOpen,
    TagName,
    BeforeAttrName,
    AttrName,
    AfterAttrName,
    BeforeAttrValue,
    AttrValueDouble,
    AttrValueSingle,
    AttrValueUnquoted,
    AttrValueUnquotedSlash,
    MarkupDeclOpen,
    CommentStart,
    Comment,
    Bogus,
    RawText,
    RawTextClose,
}
