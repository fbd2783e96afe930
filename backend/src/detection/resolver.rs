//! Column role resolution.
//!
//! Ordered, deterministic rules over [`ColumnSignal`]s:
//!
//! 1. Transcription: highest `trans_pct` above 0.3, Cyrillic columns excluded
//! 2. Ignore: empty, Cyrillic, CJK and row-number columns
//! 3. Candidates: everything else except the transcription column
//! 4. Split: best target score is the translation, best English score among
//!    the rest is English; when neither signal is clear, the shorter of the
//!    first two candidates is English
//! 5. Recovery: with no transcription yet, promote an ignored column that
//!    looks phonetic (never a Cyrillic one)
//!
//! Unresolved English / translation columns are left as `None`; the pipeline
//! turns them into [`crate::error::DetectionError`]s.

use std::collections::BTreeSet;

use super::signals::ColumnSignal;
use crate::models::RoleAssignment;

/// Minimum share of transcription-like cells for a transcription column.
pub const TRANSCRIPTION_MIN_PCT: f64 = 0.3;

/// Columns above these shares are ignored.
pub const CYRILLIC_MAX_PCT: f64 = 0.5;
pub const CJK_MAX_PCT: f64 = 0.3;
pub const NUMERIC_MAX_PCT: f64 = 0.8;

/// Below this target score the translation column is not clearly identified.
pub const AMBIGUOUS_TARGET_SCORE: f64 = 0.4;

/// Above this English score the English column looks like plain Latin text.
pub const AMBIGUOUS_ENGLISH_SCORE: f64 = 0.5;

/// Why a column is ignored, if it is.
pub fn ignore_reason(signal: &ColumnSignal) -> Option<&'static str> {
    if signal.empty {
        Some("empty")
    } else if signal.cyrillic_pct > CYRILLIC_MAX_PCT {
        Some("Cyrillic")
    } else if signal.cjk_pct > CJK_MAX_PCT {
        Some("CJK")
    } else if signal.numeric_pct > NUMERIC_MAX_PCT {
        Some("row numbers")
    } else {
        None
    }
}

/// First column with the strictly highest `key`.
fn first_max<'a>(
    signals: impl IntoIterator<Item = &'a ColumnSignal>,
    key: impl Fn(&ColumnSignal) -> f64,
) -> Option<&'a ColumnSignal> {
    let mut best: Option<&ColumnSignal> = None;
    for signal in signals {
        if best.map_or(true, |b| key(signal) > key(b)) {
            best = Some(signal);
        }
    }
    best
}

fn pick_transcription(signals: &[ColumnSignal]) -> Option<usize> {
    let eligible = signals
        .iter()
        .filter(|s| s.cyrillic_pct <= CYRILLIC_MAX_PCT && s.trans_pct > TRANSCRIPTION_MIN_PCT);
    first_max(eligible, |s| s.trans_pct).map(|s| s.col)
}

/// English and translation columns among at least two candidates.
fn split_candidates(candidates: &[&ColumnSignal]) -> Option<(usize, usize)> {
    let [first, second, ..] = candidates else {
        return None;
    };
    let translation = first_max(candidates.iter().copied(), |s| s.target_score)?;
    let english = first_max(
        candidates.iter().copied().filter(|s| s.col != translation.col),
        |s| s.english_score,
    )?;

    if translation.target_score < AMBIGUOUS_TARGET_SCORE
        && english.english_score > AMBIGUOUS_ENGLISH_SCORE
    {
        // Headwords are shorter than translations. Only the first two
        // candidates in column order are compared; the first wins a tie.
        return Some(if first.avg_len <= second.avg_len {
            (first.col, second.col)
        } else {
            (second.col, first.col)
        });
    }

    Some((english.col, translation.col))
}

/// Assign roles from column signals.
pub fn resolve_roles(signals: &[ColumnSignal]) -> RoleAssignment {
    let mut transcription_col = pick_transcription(signals);

    let mut ignored_cols: BTreeSet<usize> = signals
        .iter()
        .filter(|s| Some(s.col) != transcription_col && ignore_reason(s).is_some())
        .map(|s| s.col)
        .collect();

    let candidates: Vec<&ColumnSignal> = signals
        .iter()
        .filter(|s| !s.empty && Some(s.col) != transcription_col && !ignored_cols.contains(&s.col))
        .collect();

    let (english_col, translation_col) = match candidates.as_slice() {
        [] => (None, None),
        [only] => (Some(only.col), None),
        _ => match split_candidates(&candidates) {
            Some((english, translation)) => (Some(english), Some(translation)),
            None => (None, None),
        },
    };

    if transcription_col.is_none() {
        let recovered = signals.iter().find(|s| {
            ignored_cols.contains(&s.col)
                && s.trans_pct > TRANSCRIPTION_MIN_PCT
                && s.cyrillic_pct <= CYRILLIC_MAX_PCT
        });
        if let Some(signal) = recovered {
            ignored_cols.remove(&signal.col);
            transcription_col = Some(signal.col);
        }
    }

    RoleAssignment {
        english_col,
        transcription_col,
        translation_col,
        ignored_cols,
    }
}
