use super::StyledRun;
use crate::fonts::FontMetrics;
use crate::util::EPSILON;
use quire_style::TextAlign;

/// A piece of text from a single run placed on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub run: usize,
    pub text: String,
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub segments: Vec<LineSegment>,
    /// Natural width of the content, before alignment.
    pub width: f32,
}

#[derive(Debug, Clone)]
struct Piece {
    run: usize,
    text: String,
    width: f32,
}

#[derive(Debug, Clone)]
enum Token {
    /// Characters between breaks; one piece per run it spans.
    Word(Vec<Piece>),
    Space { run: usize },
    Break,
}

fn tokenize(runs: &[StyledRun], metrics: &dyn FontMetrics) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word: Vec<Piece> = Vec::new();

    fn flush(word: &mut Vec<Piece>, tokens: &mut Vec<Token>, runs: &[StyledRun], metrics: &dyn FontMetrics) {
        if word.is_empty() {
            return;
        }
        for piece in word.iter_mut() {
            let run = &runs[piece.run];
            piece.width = metrics.text_width(&run.font, &piece.text, run.size);
        }
        tokens.push(Token::Word(std::mem::take(word)));
    }

    for (idx, run) in runs.iter().enumerate() {
        for c in run.text.chars() {
            match c {
                '\n' => {
                    flush(&mut word, &mut tokens, runs, metrics);
                    tokens.push(Token::Break);
                }
                ' ' | '\t' | '\r' => {
                    flush(&mut word, &mut tokens, runs, metrics);
                    if !matches!(tokens.last(), Some(Token::Space { .. })) {
                        tokens.push(Token::Space { run: idx });
                    }
                }
                _ => match word.last_mut() {
                    Some(piece) if piece.run == idx => piece.text.push(c),
                    _ => word.push(Piece {
                        run: idx,
                        text: c.to_string(),
                        width: 0.0,
                    }),
                },
            }
        }
    }
    flush(&mut word, &mut tokens, runs, metrics);
    tokens
}

fn space_width(runs: &[StyledRun], metrics: &dyn FontMetrics, run: usize) -> f32 {
    let run = &runs[run];
    metrics.char_width(&run.font, ' ', run.size)
}

/// Widest hard line of `runs` when nothing wraps.
pub fn natural_width(runs: &[StyledRun], metrics: &dyn FontMetrics) -> f32 {
    let mut widest = 0.0f32;
    let mut line = 0.0f32;
    let mut pending_space = 0.0f32;
    for token in tokenize(runs, metrics) {
        match token {
            Token::Word(pieces) => {
                if line > 0.0 {
                    line += pending_space;
                }
                line += pieces.iter().map(|p| p.width).sum::<f32>();
                pending_space = 0.0;
            }
            Token::Space { run } => pending_space = space_width(runs, metrics, run),
            Token::Break => {
                widest = widest.max(line);
                line = 0.0;
                pending_space = 0.0;
            }
        }
    }
    widest.max(line)
}

/// Greedy line breaker. Lines are produced lazily, so a caller can stop
/// once it has what fits; a new wrapper restarts the paragraph at another width.
pub struct LineWrapper<'a> {
    runs: &'a [StyledRun],
    metrics: &'a dyn FontMetrics,
    tokens: Vec<Token>,
    pos: usize,
    carry: Option<Vec<Piece>>,
    max_width: f32,
    align: TextAlign,
    done: bool,
}

/// A word placed on the line being built.
struct Placed {
    pieces: Vec<Piece>,
    x: f32,
    /// Whether a space precedes the word.
    spaced: bool,
}

impl<'a> LineWrapper<'a> {
    pub fn new(
        runs: &'a [StyledRun],
        metrics: &'a dyn FontMetrics,
        max_width: f32,
        align: TextAlign,
    ) -> Self {
        Self {
            runs,
            metrics,
            tokens: tokenize(runs, metrics),
            pos: 0,
            carry: None,
            max_width: max_width.max(1.0),
            align,
            done: false,
        }
    }

    /// Splits an overlong word after the last character that still fits,
    /// always keeping at least one character on the line.
    fn split_word(&self, pieces: Vec<Piece>) -> (Vec<Piece>, Option<Vec<Piece>>) {
        let mut head: Vec<Piece> = Vec::new();
        let mut tail: Vec<Piece> = Vec::new();
        let mut used = 0.0;
        let mut overflowed = false;

        for piece in pieces {
            let run = &self.runs[piece.run];
            let mut head_text = String::new();
            let mut head_width = 0.0;
            let mut tail_text = String::new();
            for c in piece.text.chars() {
                let w = self.metrics.char_width(&run.font, c, run.size);
                let first = head.is_empty() && head_text.is_empty();
                if !overflowed && (first || used + w <= self.max_width + EPSILON) {
                    head_text.push(c);
                    head_width += w;
                    used += w;
                } else {
                    overflowed = true;
                    tail_text.push(c);
                }
            }
            if !head_text.is_empty() {
                head.push(Piece {
                    run: piece.run,
                    text: head_text,
                    width: head_width,
                });
            }
            if !tail_text.is_empty() {
                let width = self.metrics.text_width(&run.font, &tail_text, run.size);
                tail.push(Piece {
                    run: piece.run,
                    text: tail_text,
                    width,
                });
            }
        }
        (head, if tail.is_empty() { None } else { Some(tail) })
    }

    fn finish(&self, words: Vec<Placed>, width: f32, last: bool) -> Line {
        let slack = (self.max_width - width).max(0.0);
        let gaps = words.iter().filter(|w| w.spaced).count();
        let justify = self.align == TextAlign::Justify && !last && gaps > 0;
        let offset = match self.align {
            TextAlign::Right => slack,
            TextAlign::Center => slack / 2.0,
            TextAlign::Left | TextAlign::Justify => 0.0,
        };
        let stretch = if justify { slack / gaps as f32 } else { 0.0 };

        let mut segments: Vec<LineSegment> = Vec::new();
        let mut gaps_seen = 0;
        for word in words {
            if word.spaced {
                gaps_seen += 1;
            }
            let mut x = word.x + offset + stretch * gaps_seen as f32;
            for (i, piece) in word.pieces.into_iter().enumerate() {
                let merge = segments
                    .last()
                    .is_some_and(|s| s.run == piece.run && (i > 0 || (!justify && word.spaced)));
                if merge && let Some(prev) = segments.last_mut() {
                    if i == 0 {
                        prev.text.push(' ');
                    }
                    prev.text.push_str(&piece.text);
                    prev.width = x + piece.width - prev.x;
                } else {
                    segments.push(LineSegment {
                        run: piece.run,
                        text: piece.text,
                        x,
                        width: piece.width,
                    });
                }
                x += piece.width;
            }
        }
        Line { segments, width }
    }
}

impl Iterator for LineWrapper<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if self.done {
            return None;
        }

        let mut words: Vec<Placed> = Vec::new();
        let mut width = 0.0f32;
        let mut pending_space: Option<f32> = None;

        loop {
            let pieces = if let Some(carry) = self.carry.take() {
                carry
            } else {
                match self.tokens.get(self.pos) {
                    None => {
                        self.done = true;
                        if words.is_empty() {
                            return None;
                        }
                        return Some(self.finish(words, width, true));
                    }
                    Some(Token::Break) => {
                        self.pos += 1;
                        if self.pos >= self.tokens.len() && words.is_empty() {
                            // A trailing break ends the paragraph without an empty line.
                            self.done = true;
                            return None;
                        }
                        return Some(self.finish(words, width, true));
                    }
                    Some(Token::Space { run }) => {
                        let run = *run;
                        self.pos += 1;
                        if !words.is_empty() {
                            pending_space = Some(space_width(self.runs, self.metrics, run));
                        }
                        continue;
                    }
                    Some(Token::Word(pieces)) => {
                        let pieces = pieces.clone();
                        self.pos += 1;
                        pieces
                    }
                }
            };

            let word_width: f32 = pieces.iter().map(|p| p.width).sum();

            if words.is_empty() {
                if word_width > self.max_width + EPSILON {
                    let (head, tail) = self.split_word(pieces);
                    let head_width = head.iter().map(|p| p.width).sum();
                    self.carry = tail;
                    words.push(Placed {
                        pieces: head,
                        x: 0.0,
                        spaced: false,
                    });
                    if self.carry.is_some() {
                        return Some(self.finish(words, head_width, false));
                    }
                    width = head_width;
                    continue;
                }
                words.push(Placed {
                    pieces,
                    x: 0.0,
                    spaced: false,
                });
                width = word_width;
                continue;
            }

            let space = pending_space.take().unwrap_or(0.0);
            if width + space + word_width > self.max_width + EPSILON {
                self.carry = Some(pieces);
                return Some(self.finish(words, width, false));
            }
            words.push(Placed {
                pieces,
                x: width + space,
                spaced: space > 0.0,
            });
            width += space + word_width;
        }
    }
}
