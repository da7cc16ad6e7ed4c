//! DEM text parser.
//!
//! Parses the line-oriented detector error model format into an
//! [`ErrorModel`].
//!
//! # Supported Syntax
//!
//! ```text
//! error(probability) D<id> ... [^ ...] L<id> ...
//! detector(x, y, t) D<id>
//! logical_observable L<id>
//! shift_detectors(dx, dy, dt) N
//! repeat N { ... }
//! ```
//!
//! `repeat` blocks are expanded; `shift_detectors N` adds `N` to every later
//! detector id. Coordinates are accepted and ignored. Expansion stops with a
//! syntax error once [`MAX_EXPANDED_STEPS`] instructions and repeat
//! iterations have been executed.

use crate::error::{ModelError, ModelResult};
use crate::model::types::{ErrorModel, Mechanism, Symptom, Target, MAX_OBSERVABLES};

/// One parsed line, or a repeat block with its body.
#[derive(Debug)]
enum Item<'a> {
    Line { line: usize, text: &'a str },
    Repeat {
        line: usize,
        count: u64,
        body: Vec<Item<'a>>,
    },
}

/// Upper bound on executed instructions plus repeat iterations in one parse.
pub const MAX_EXPANDED_STEPS: u64 = 1 << 24;

/// Running state while executing parsed items.
#[derive(Default)]
struct Reader {
    detector_offset: u64,
    num_detectors: u64,
    num_observables: u32,
    mechanisms: Vec<Mechanism>,
    steps: u64,
}

/// Parse DEM text into an [`ErrorModel`].
///
/// `num_detectors` and `num_observables` are one past the largest index
/// referenced or declared anywhere in the text.
pub fn parse_dem(content: &str) -> ModelResult<ErrorModel> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty() && !text.starts_with('#'));

    let items = parse_block(&mut lines, None)?;
    let mut reader = Reader::default();
    reader.run(&items)?;

    let num_detectors = u32::try_from(reader.num_detectors)
        .map_err(|_| ModelError::syntax(0, "detector count does not fit in 32 bits"))?;
    ErrorModel::new(num_detectors, reader.num_observables, reader.mechanisms)
}

/// Collects items until end of input or, inside a block, the closing brace.
fn parse_block<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    opened_at: Option<usize>,
) -> ModelResult<Vec<Item<'a>>> {
    let mut items = Vec::new();
    while let Some((line, text)) = lines.next() {
        let text = strip_comment(text);
        if text == "}" {
            return match opened_at {
                Some(_) => Ok(items),
                None => Err(ModelError::syntax(line, "unmatched '}'")),
            };
        }
        if instruction_name(text) == "repeat" {
            let count = parse_repeat_header(line, text)?;
            let body = parse_block(lines, Some(line))?;
            items.push(Item::Repeat { line, count, body });
        } else {
            items.push(Item::Line { line, text });
        }
    }
    match opened_at {
        Some(line) => Err(ModelError::syntax(line, "repeat block is never closed")),
        None => Ok(items),
    }
}

fn parse_repeat_header(line: usize, text: &str) -> ModelResult<u64> {
    // Format: repeat N {
    let rest = text["repeat".len()..].trim();
    let rest = rest
        .strip_suffix('{')
        .ok_or_else(|| ModelError::syntax(line, "expected '{' after repeat count"))?;
    rest.trim()
        .parse()
        .map_err(|_| ModelError::syntax(line, format!("invalid repeat count '{}'", rest.trim())))
}

impl Reader {
    fn run(&mut self, items: &[Item<'_>]) -> ModelResult<()> {
        for item in items {
            match item {
                Item::Line { line, text } => {
                    self.step(*line)?;
                    self.instruction(*line, text)?;
                }
                Item::Repeat { line, count, body } => {
                    if *count > MAX_EXPANDED_STEPS - self.steps {
                        return Err(self.too_many_steps(*line));
                    }
                    for _ in 0..*count {
                        self.step(*line)?;
                        self.run(body)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn step(&mut self, line: usize) -> ModelResult<()> {
        if self.steps >= MAX_EXPANDED_STEPS {
            return Err(self.too_many_steps(line));
        }
        self.steps += 1;
        Ok(())
    }

    fn too_many_steps(&self, line: usize) -> ModelError {
        ModelError::syntax(
            line,
            format!("repeat expansion exceeds {MAX_EXPANDED_STEPS} steps"),
        )
    }

    fn instruction(&mut self, line: usize, text: &str) -> ModelResult<()> {
        let name = instruction_name(text);
        let (args, targets) = split_args(line, &text[name.len()..])?;
        match name {
            "error" => self.error(line, args, targets),
            "detector" => {
                for token in targets.split_whitespace() {
                    let id = self.detector_id(line, token)?;
                    self.num_detectors = self.num_detectors.max(u64::from(id) + 1);
                }
                Ok(())
            }
            "logical_observable" => {
                for token in targets.split_whitespace() {
                    let id = observable_id(line, token)?;
                    self.num_observables = self.num_observables.max(id + 1);
                }
                Ok(())
            }
            "shift_detectors" => {
                // Format: shift_detectors(dx, dy, dt) N, the N being optional
                let shift = targets.trim();
                if !shift.is_empty() {
                    let n: u64 = shift.parse().map_err(|_| {
                        ModelError::syntax(line, format!("invalid detector shift '{shift}'"))
                    })?;
                    self.detector_offset = self
                        .detector_offset
                        .checked_add(n)
                        .ok_or_else(|| ModelError::syntax(line, "detector shift overflows"))?;
                }
                Ok(())
            }
            other => Err(ModelError::syntax(
                line,
                format!("unknown instruction '{other}'"),
            )),
        }
    }

    fn error(&mut self, line: usize, args: Option<&str>, targets: &str) -> ModelResult<()> {
        // Format: error(probability) D<id1> D<id2> ... [^ ...] [L<obs_id> ...]
        let prob_str = args.ok_or_else(|| ModelError::syntax(line, "error without probability"))?;
        let probability: f64 = prob_str
            .trim()
            .parse()
            .map_err(|_| ModelError::syntax(line, format!("invalid probability '{prob_str}'")))?;

        let mut parsed = Vec::new();
        for token in targets.split_whitespace() {
            if token == "^" {
                parsed.push(Target::Separator);
            } else if token.starts_with('D') {
                let id = self.detector_id(line, token)?;
                self.num_detectors = self.num_detectors.max(u64::from(id) + 1);
                parsed.push(Target::Detector(id));
            } else if token.starts_with('L') {
                let id = observable_id(line, token)?;
                self.num_observables = self.num_observables.max(id + 1);
                parsed.push(Target::Observable(id));
            } else {
                return Err(ModelError::syntax(
                    line,
                    format!("unexpected error target '{token}'"),
                ));
            }
        }

        let symptom = Symptom::from_targets(&parsed)?;
        self.mechanisms.push(Mechanism::new(probability, symptom));
        Ok(())
    }

    fn detector_id(&self, line: usize, token: &str) -> ModelResult<u32> {
        let raw: u64 = token
            .strip_prefix('D')
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| ModelError::syntax(line, format!("invalid detector target '{token}'")))?;
        u32::try_from(raw.saturating_add(self.detector_offset)).map_err(|_| {
            ModelError::syntax(line, format!("detector '{token}' exceeds 32-bit range"))
        })
    }
}

fn observable_id(line: usize, token: &str) -> ModelResult<u32> {
    let id: u32 = token
        .strip_prefix('L')
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ModelError::syntax(line, format!("invalid observable target '{token}'")))?;
    if id >= MAX_OBSERVABLES {
        return Err(ModelError::ObservableOutOfRange {
            observable: id,
            num_observables: MAX_OBSERVABLES,
        });
    }
    Ok(id)
}

/// Leading identifier of an instruction.
fn instruction_name(text: &str) -> &str {
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    &text[..end]
}

/// Splits `(args) targets` into the parenthesised argument text and the rest.
fn split_args(line: usize, rest: &str) -> ModelResult<(Option<&str>, &str)> {
    if let Some(inner) = rest.strip_prefix('(') {
        let close = inner
            .find(')')
            .ok_or_else(|| ModelError::syntax(line, "missing closing parenthesis"))?;
        Ok((Some(&inner[..close]), &inner[close + 1..]))
    } else {
        Ok((None, rest))
    }
}

fn strip_comment(text: &str) -> &str {
    match text.find('#') {
        Some(i) => text[..i].trim_end(),
        None => text,
    }
}
