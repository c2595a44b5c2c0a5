use crate::font::Style;

/// Identifies an atomic group: tokens sharing a group are kept on the same
/// line. Groups are either named by the caller or minted by
/// [`pair_connectors`](crate::layout::pair_connectors); the two kinds never
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupId(GroupKind);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GroupKind {
    Named(String),
    Minted(usize),
}

impl GroupId {
    /// A caller-named group. Equal names mean the same group.
    pub fn named<S: Into<String>>(name: S) -> GroupId {
        GroupId(GroupKind::Named(name.into()))
    }

    pub(crate) fn minted(n: usize) -> GroupId {
        GroupId(GroupKind::Minted(n))
    }

    /// Whether the group was made by connector pairing
    pub fn is_minted(&self) -> bool {
        matches!(self.0, GroupKind::Minted(_))
    }
}

/// A caller-supplied run of styled text
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
    /// Atomic group the segment's words belong to, if any
    pub group: Option<GroupId>,
}

impl Segment {
    /// Ungrouped text in the regular face
    pub fn normal<S: Into<String>>(text: S) -> Segment {
        Segment {
            text: text.into(),
            style: Style::Normal,
            group: None,
        }
    }

    /// Ungrouped text in the bold face
    pub fn bold<S: Into<String>>(text: S) -> Segment {
        Segment {
            text: text.into(),
            style: Style::Bold,
            group: None,
        }
    }

    /// Puts the segment into an atomic group
    pub fn in_group(mut self, group: GroupId) -> Segment {
        self.group = Some(group);
        self
    }
}

/// A word or a run of break spaces, carrying the style and group of the
/// segment it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub style: Style,
    pub group: Option<GroupId>,
}

impl Token {
    /// Space tokens are never drawn and never start or end a line
    pub fn is_space(&self) -> bool {
        self.text.chars().all(is_break_space)
    }
}

/// Whitespace a line may break at. No-break spaces are part of words.
pub fn is_break_space(ch: char) -> bool {
    ch.is_whitespace() && !matches!(ch, '\u{a0}' | '\u{2007}' | '\u{202f}')
}

/// Splits segments into words and space runs. Concatenating the text of the
/// returned tokens gives back the concatenated segment text.
pub fn tokenize(segments: &[Segment]) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(segments.len() * 4);

    for segment in segments {
        let mut start = 0;
        let mut in_space: Option<bool> = None;

        for (i, ch) in segment.text.char_indices() {
            let space = is_break_space(ch);
            if in_space.is_some_and(|prev| prev != space) {
                tokens.push(token_from(segment, &segment.text[start..i]));
                start = i;
            }
            in_space = Some(space);
        }
        if start < segment.text.len() {
            tokens.push(token_from(segment, &segment.text[start..]));
        }
    }

    tokens
}

fn token_from(segment: &Segment, text: &str) -> Token {
    Token {
        text: text.to_string(),
        style: segment.style,
        group: segment.group.clone(),
    }
}
