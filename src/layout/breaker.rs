use super::orphans::{pair_connectors, ConnectorWords};
use super::segment::{tokenize, GroupId, Segment, Token};
use crate::font::TextMeasurer;
use crate::units::Pt;
use std::collections::VecDeque;

/// A token together with its rendered width
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredToken {
    pub token: Token,
    pub width: Pt,
}

/// One finished line. It never starts or ends with a space token.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub tokens: Vec<MeasuredToken>,
    pub width: Pt,
}

impl Line {
    /// The plain text of the line
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.token.text.as_str()).collect()
    }
}

/// The lines of a paragraph, in order
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub lines: Vec<Line>,
    /// Whether the primary group did not fit on the first line and was
    /// pushed to the next one
    pub first_group_wrapped: bool,
}

/// How to break a paragraph into lines
#[derive(Debug, Clone, PartialEq)]
pub struct BreakOptions {
    /// Width available to every line
    pub max_width: Pt,
    /// How much of `max_width` the first line gives up to an indent
    pub first_line_indent: Pt,
    /// Size text is measured at
    pub font_size: Pt,
    /// Words a line should not end on
    pub connectors: ConnectorWords,
    /// Whether [`layout_segments`] glues connector words to the word after them
    pub pair_connectors: bool,
    /// The group whose wrapping is reported in
    /// [`LayoutResult::first_group_wrapped`]
    pub primary_group: Option<GroupId>,
}

impl BreakOptions {
    /// No indent, no primary group, Portuguese connectors paired
    pub fn new(max_width: Pt, font_size: Pt) -> BreakOptions {
        BreakOptions {
            max_width,
            first_line_indent: Pt::ZERO,
            font_size,
            connectors: ConnectorWords::portuguese(),
            pair_connectors: true,
            primary_group: None,
        }
    }

    /// Narrow the first line by `indent`
    pub fn first_line_indent(&mut self, indent: Pt) -> &mut Self {
        self.first_line_indent = indent;
        self
    }

    /// Words that must not end a line
    pub fn connectors(&mut self, connectors: ConnectorWords) -> &mut Self {
        self.connectors = connectors;
        self
    }

    /// Turn connector pairing on or off
    pub fn pair_connectors(&mut self, pair: bool) -> &mut Self {
        self.pair_connectors = pair;
        self
    }

    /// Track whether `group` is pushed off the first line
    pub fn primary_group(&mut self, group: GroupId) -> &mut Self {
        self.primary_group = Some(group);
        self
    }

    /// Width available to the line with the given index
    pub fn line_width(&self, line_index: usize) -> Pt {
        if line_index == 0 {
            (self.max_width - self.first_line_indent).max(Pt::ZERO)
        } else {
            self.max_width
        }
    }
}

/// Tokenizes `segments`, glues connector words when enabled, and breaks the
/// result into lines
pub fn layout_segments<M: TextMeasurer + ?Sized>(
    segments: &[Segment],
    measurer: &M,
    options: &BreakOptions,
) -> LayoutResult {
    let tokens = tokenize(segments);
    let tokens = if options.pair_connectors {
        pair_connectors(tokens, &options.connectors)
    } else {
        tokens
    };
    break_lines(tokens, measurer, options)
}

/// The line currently being filled, plus the lines already closed
#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line>,
    current: Vec<MeasuredToken>,
    width: Pt,
}

impl LineBuilder {
    fn push(&mut self, token: MeasuredToken) {
        self.width += token.width;
        self.current.push(token);
    }

    /// Trims trailing spaces and moves the current line into `lines`
    fn close_line(&mut self) {
        while self.current.last().is_some_and(|t| t.token.is_space()) {
            self.current.pop();
        }
        if !self.current.is_empty() {
            let tokens = std::mem::take(&mut self.current);
            let width = tokens.iter().map(|t| t.width).sum();
            self.lines.push(Line { tokens, width });
        }
        self.width = Pt::ZERO;
    }

    /// Moves a connector word ending the current line (with the spaces around
    /// it) back to the front of `pending`, so that it starts the next line
    /// instead. Only done when the line keeps at least one other word.
    fn relocate_connector(
        &mut self,
        pending: &mut VecDeque<MeasuredToken>,
        connectors: &ConnectorWords,
    ) -> bool {
        let Some(last) = self.current.iter().rposition(|t| !t.token.is_space()) else {
            return false;
        };
        let words = self.current.iter().filter(|t| !t.token.is_space()).count();
        if words < 2 || !connectors.is_loose_connector(&self.current[last].token) {
            return false;
        }

        let mut from = last;
        if from > 0 {
            let before = &self.current[from - 1].token;
            if before.is_space() && before.group.is_none() {
                from -= 1;
            }
        }

        log::trace!(
            "moving connector {:?} to the next line",
            self.current[last].token.text
        );
        for token in self.current.drain(from..).rev() {
            pending.push_front(token);
        }
        self.width = self.current.iter().map(|t| t.width).sum();
        true
    }
}

/// Greedily breaks tokens into lines no wider than the options allow.
///
/// Tokens sharing a group are placed together: when a group does not fit on
/// the current line it moves to the next one in one piece. A group that does
/// not fit even on an empty line loses its group and wraps like plain words.
/// A single word wider than a line gets a line of its own.
///
/// Before a line is closed, a connector word left dangling at its end is
/// moved to the start of the next line (at most once per line; the line is
/// always closed right after, so every line makes progress).
pub fn break_lines<M: TextMeasurer + ?Sized>(
    tokens: Vec<Token>,
    measurer: &M,
    options: &BreakOptions,
) -> LayoutResult {
    let mut pending: VecDeque<MeasuredToken> = tokens
        .into_iter()
        .map(|token| {
            let width = measurer.measure(&token.text, token.style, options.font_size);
            MeasuredToken { token, width }
        })
        .collect();

    let mut builder = LineBuilder::default();
    let mut first_group_wrapped = false;

    loop {
        let Some(next) = pending.front() else {
            break;
        };
        let limit = options.line_width(builder.lines.len());

        if next.token.is_space() && builder.current.is_empty() {
            pending.pop_front();
            continue;
        }

        if let Some(group) = next.token.group.clone() {
            let run = pending
                .iter()
                .take_while(|t| t.token.group.as_ref() == Some(&group))
                .count();
            let run_width: Pt = pending.iter().take(run).map(|t| t.width).sum();

            if builder.width + run_width <= limit {
                for token in pending.drain(..run) {
                    builder.push(token);
                }
            } else if !builder.current.is_empty() {
                if builder.lines.is_empty() && options.primary_group.as_ref() == Some(&group) {
                    first_group_wrapped = true;
                }
                builder.relocate_connector(&mut pending, &options.connectors);
                builder.close_line();
            } else {
                log::trace!(
                    "group of {} tokens is wider than the line ({} > {}), flattening it",
                    run,
                    run_width,
                    limit
                );
                for token in pending.iter_mut().take(run) {
                    token.token.group = None;
                }
            }
            continue;
        }

        if builder.width + next.width <= limit {
            if let Some(token) = pending.pop_front() {
                builder.push(token);
            }
        } else if !builder.current.is_empty() {
            builder.relocate_connector(&mut pending, &options.connectors);
            builder.close_line();
        } else if let Some(token) = pending.pop_front() {
            log::trace!(
                "{:?} is wider than the line ({} > {}), placing it alone",
                token.token.text,
                token.width,
                limit
            );
            builder.push(token);
            builder.close_line();
        }
    }

    builder.close_line();
    LayoutResult {
        lines: builder.lines,
        first_group_wrapped,
    }
}
