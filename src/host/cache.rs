//! Paint cache keyed by colour content.

use super::{Canvas, Paint};
use crate::model::{Rgba, VariableRef};
use std::collections::HashMap;
use xxhash_rust::xxh3::xxh3_64;

/// Append-only cache of created paints.
///
/// Static paints are keyed by colour; bound paints by colour and variable
/// id. Entries are never replaced, so repeated lookups return the same paint.
#[derive(Debug, Clone, Default)]
pub struct FillCache {
    paints: HashMap<u64, Paint>,
    hits: usize,
    misses: usize,
}

fn content_key(color: &Rgba, variable: Option<&str>) -> u64 {
    let mut input = Vec::with_capacity(4 * 8 + variable.map_or(0, str::len) + 1);
    for channel in [color.r, color.g, color.b, color.alpha()] {
        input.extend_from_slice(&channel.to_bits().to_le_bytes());
    }
    if let Some(id) = variable {
        input.push(b'|');
        input.extend_from_slice(id.as_bytes());
    }
    xxh3_64(&input)
}

impl FillCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Static solid paint for `color`.
    pub fn solid<C: Canvas + ?Sized>(&mut self, color: Rgba, canvas: &mut C) -> Paint {
        let key = content_key(&color, None);
        if let Some(paint) = self.paints.get(&key) {
            self.hits += 1;
            return paint.clone();
        }
        self.misses += 1;
        let paint = canvas.solid_paint(color);
        self.paints.insert(key, paint.clone());
        paint
    }

    /// Paint for `color`, bound to `binding` when given.
    ///
    /// A failed binding falls back to the static paint and is remembered so
    /// the host is not asked again for the same pair.
    pub fn swatch<C: Canvas + ?Sized>(
        &mut self,
        color: Rgba,
        binding: Option<&VariableRef>,
        canvas: &mut C,
    ) -> Paint {
        let Some(variable) = binding else {
            return self.solid(color, canvas);
        };

        let key = content_key(&color, Some(&variable.id));
        if let Some(paint) = self.paints.get(&key) {
            self.hits += 1;
            return paint.clone();
        }

        let base = self.solid(color, canvas);
        self.misses += 1;
        let paint = match canvas.bind_paint_to_variable(&base, variable) {
            Ok(bound) => bound,
            Err(err) => {
                tracing::warn!(
                    variable = %variable.name,
                    error = %err,
                    "swatch binding failed, using static paint"
                );
                base
            }
        };
        self.paints.insert(key, paint.clone());
        paint
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paints.is_empty()
    }

    /// (hits, misses)
    #[must_use]
    pub const fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }
}
