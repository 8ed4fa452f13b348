use std::fmt;
use std::str::FromStr;

use crate::{
    animation::ease::Ease,
    foundation::error::{IntroError, IntroResult},
};

/// Interpolation contract for tweened value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// A single from/to property animation, in seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween<T> {
    /// Value before and at the start of the tween.
    pub from: T,
    /// Value at and after the end of the tween.
    pub to: T,
    /// Length in seconds (`>= 0`).
    pub duration: f64,
    /// Easing applied to progress.
    pub ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    /// Value at `elapsed` seconds after the tween starts.
    pub fn sample(&self, elapsed: f64) -> T {
        if elapsed <= 0.0 {
            return self.from.clone();
        }
        if self.duration <= 0.0 || elapsed >= self.duration {
            return self.to.clone();
        }
        T::lerp(&self.from, &self.to, self.ease.apply(elapsed / self.duration))
    }
}

/// Where a tween is placed relative to what is already on the timeline.
///
/// String forms: `">"` (after the previous tween), `"<"` (with the previous tween), `"-=0.7"`
/// (overlapping the previous tween's end), `"+=0.2"` (a gap after it), `"1.5"` (absolute).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    /// Start when the previously added tween ends.
    AfterPrevious,
    /// Start together with the previously added tween.
    WithPrevious,
    /// Start this many seconds before the previous tween ends.
    Overlap(f64),
    /// Start this many seconds after the previous tween ends.
    Gap(f64),
    /// Start at an absolute time.
    At(f64),
}

impl FromStr for Position {
    type Err = IntroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let secs = |v: &str| -> IntroResult<f64> {
            let v: f64 = v
                .trim()
                .parse()
                .map_err(|_| IntroError::validation(format!("bad timeline position '{s}'")))?;
            if !v.is_finite() || v < 0.0 {
                return Err(IntroError::validation(format!(
                    "timeline position offset must be finite and >= 0, got '{s}'"
                )));
            }
            Ok(v)
        };
        match s {
            ">" | "" => Ok(Self::AfterPrevious),
            "<" => Ok(Self::WithPrevious),
            _ => {
                if let Some(rest) = s.strip_prefix("-=") {
                    Ok(Self::Overlap(secs(rest)?))
                } else if let Some(rest) = s.strip_prefix("+=") {
                    Ok(Self::Gap(secs(rest)?))
                } else {
                    Ok(Self::At(secs(s)?))
                }
            }
        }
    }
}

impl TryFrom<String> for Position {
    type Error = IntroError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AfterPrevious => f.write_str(">"),
            Self::WithPrevious => f.write_str("<"),
            Self::Overlap(v) => write!(f, "-={v}"),
            Self::Gap(v) => write!(f, "+={v}"),
            Self::At(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Clone, Debug)]
struct Scheduled<K, T> {
    target: K,
    start: f64,
    tween: Tween<T>,
}

impl<K, T> Scheduled<K, T> {
    fn end(&self) -> f64 {
        self.start + self.tween.duration
    }
}

/// Sequenced tweens over keyed targets, sampled by absolute timeline time in seconds.
#[derive(Clone, Debug)]
pub struct Timeline<K, T> {
    entries: Vec<Scheduled<K, T>>,
}

impl<K, T> Default for Timeline<K, T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K, T> Timeline<K, T>
where
    K: Copy + PartialEq,
    T: Lerp + Clone,
{
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tween for `target` placed at `position`; returns its start time.
    ///
    /// Start times never go below zero.
    pub fn add(&mut self, target: K, tween: Tween<T>, position: Position) -> IntroResult<f64> {
        if !tween.duration.is_finite() || tween.duration < 0.0 {
            return Err(IntroError::validation(format!(
                "tween duration must be finite and >= 0, got {}",
                tween.duration
            )));
        }

        let (prev_start, prev_end) = self
            .entries
            .last()
            .map(|e| (e.start, e.end()))
            .unwrap_or((0.0, 0.0));
        let start = match position {
            Position::AfterPrevious => prev_end,
            Position::WithPrevious => prev_start,
            Position::Overlap(by) => prev_end - by,
            Position::Gap(by) => prev_end + by,
            Position::At(at) => at,
        }
        .max(0.0);

        self.entries.push(Scheduled {
            target,
            start,
            tween,
        });
        Ok(start)
    }

    /// Start time of the first tween for `target`.
    pub fn start_of(&self, target: K) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.target == target)
            .map(|e| e.start)
    }

    /// End time of the last tween for `target`.
    pub fn end_of(&self, target: K) -> Option<f64> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.target == target)
            .map(Scheduled::end)
    }

    /// Total length: the latest end time of any tween.
    pub fn duration(&self) -> f64 {
        self.entries.iter().map(Scheduled::end).fold(0.0, f64::max)
    }

    /// `true` once every tween has finished at time `t`.
    pub fn is_complete(&self, t: f64) -> bool {
        t >= self.duration()
    }

    /// Value of `target` at time `t`.
    ///
    /// Before its first tween starts, a target holds that tween's `from` value. After that, the
    /// most recently started tween for the target decides.
    pub fn sample(&self, target: K, t: f64) -> Option<T> {
        let mut first = None;
        let mut active = None;
        for e in self.entries.iter().filter(|e| e.target == target) {
            if first.is_none() {
                first = Some(e);
            }
            if e.start <= t {
                active = Some(e);
            }
        }
        match active {
            Some(e) => Some(e.tween.sample(t - e.start)),
            None => first.map(|e| e.tween.from.clone()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
