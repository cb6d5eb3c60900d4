//! Deep structural comparison
//!
//! [`deep_equal`] walks two values in lockstep and stops at the first point
//! where they diverge. Reference-like pairs (slices, maps, pointers and
//! interfaces) are recorded in a visited map keyed by their addresses and
//! type, so a cyclic structure is walked once per distinct pair and the walk
//! terminates. A cell reached again while this comparison holds it is
//! treated the same way as a revisited pair.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

use deepeq_core_types::schema;

use crate::errors::{Divergence, Verdict};
use crate::format::render;
use crate::options::{CompareOptions, CyclePolicy};
use crate::reflect::{
    address, CellView, DynValue, Kind, MapView, RecordView, Reflect, Scalar, SequenceView, Shape,
    TypeInfo,
};
use crate::{log_op_divergence, log_op_end, log_op_start};

/// Key of the visited map; the address pair is ordered so that (a, b) and
/// (b, a) share one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Visit {
    a1: usize,
    a2: usize,
    ty: TypeId,
}

impl Visit {
    fn new(x: usize, y: usize, ty: TypeId) -> Self {
        let (a1, a2) = if x <= y { (x, y) } else { (y, x) };
        Self { a1, a2, ty }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    /// Comparison of the pair has started but not finished
    InProgress,
    /// The pair compared equal
    Verified,
}

/// A single deep comparison and its visited map
///
/// Most callers want [`deep_equal`]; a `Comparator` is useful when the visit
/// statistics matter.
///
/// ```
/// use deepeq_core::{CompareOptions, Comparator};
///
/// let options = CompareOptions::default();
/// let mut comparator = Comparator::new(&options);
/// let (a, b) = (vec![vec![1u8]], vec![vec![1u8]]);
/// assert!(comparator.compare(&a, &b).is_ok());
/// assert_eq!(comparator.visited(), 2);
/// ```
pub struct Comparator<'o> {
    options: &'o CompareOptions,
    visited: HashMap<Visit, VisitState>,
    /// Addresses of cells whose contents are being compared right now
    held: HashSet<usize>,
}

impl<'o> Comparator<'o> {
    pub fn new(options: &'o CompareOptions) -> Self {
        Self {
            options,
            visited: HashMap::new(),
            held: HashSet::new(),
        }
    }

    /// Number of reference-like pairs recorded by the last comparison
    pub fn visited(&self) -> usize {
        self.visited.len()
    }

    /// Compare two values
    ///
    /// A nil [`DynValue`] at the top level is the absent value: two of them
    /// are equal, one of them against anything else is not.
    ///
    /// # Errors
    ///
    /// Returns the first divergence found, wrapped with its path.
    pub fn compare(&mut self, x: &dyn Reflect, y: &dyn Reflect) -> Verdict {
        self.visited.clear();
        self.held.clear();

        match (top_level(x), top_level(y)) {
            (None, None) => Ok(()),
            (None, Some(y)) => Err(Divergence::OnlyOneNil {
                left: "<nil>".to_string(),
                right: render(y),
            }),
            (Some(x), None) => Err(Divergence::OnlyOneNil {
                left: render(x),
                right: "<nil>".to_string(),
            }),
            (Some(x), Some(y)) => self.deep_value_equal(x, y, 0),
        }
    }

    fn deep_value_equal(&mut self, x: &dyn Reflect, y: &dyn Reflect, depth: usize) -> Verdict {
        let (tx, ty) = (x.type_info(), y.type_info());
        if tx != ty {
            return Err(Divergence::TypeMismatch {
                left_type: tx.name(),
                right_type: ty.name(),
            });
        }

        if let Some(max_depth) = self.options.max_depth {
            if depth > max_depth {
                return Err(Divergence::DepthExceeded { max_depth });
            }
        }

        let (sx, sy) = (x.reflect(), y.reflect());

        let visit = if sx.kind().is_reference_like() && sy.kind().is_reference_like() {
            Some(Visit::new(address(x), address(y), tx.id()))
        } else {
            None
        };

        if let Some(visit) = visit {
            match self.visited.get(&visit) {
                Some(VisitState::Verified) => {
                    log_cycle_short_circuit(tx, depth);
                    return Ok(());
                }
                Some(VisitState::InProgress) => return self.revisit(tx, depth),
                None => {
                    self.visited.insert(visit, VisitState::InProgress);
                }
            }
        }

        let verdict = self.dispatch(x, y, sx, sy, depth);

        if let (Some(visit), Ok(())) = (visit, &verdict) {
            self.visited.insert(visit, VisitState::Verified);
        }
        verdict
    }

    /// Verdict for a pair reached again while its comparison is in progress
    fn revisit(&self, ty: TypeInfo, depth: usize) -> Verdict {
        match self.options.cycle_policy {
            CyclePolicy::Optimistic => {
                log_cycle_short_circuit(ty, depth);
                Ok(())
            }
            CyclePolicy::Strict => Err(Divergence::CycleUnverified {
                type_name: ty.name(),
            }),
        }
    }

    fn dispatch(
        &mut self,
        x: &dyn Reflect,
        y: &dyn Reflect,
        sx: Shape<'_>,
        sy: Shape<'_>,
        depth: usize,
    ) -> Verdict {
        // accessibility fallback: opaque values are never inspected
        let (x_opaque, y_opaque) = (matches!(sx, Shape::Opaque), matches!(sy, Shape::Opaque));
        if x_opaque || y_opaque {
            if x_opaque == y_opaque {
                return Ok(());
            }
            return Err(Divergence::Inaccessible {
                left_accessible: !x_opaque,
                right_accessible: !y_opaque,
            });
        }

        if sx.kind() != sy.kind() {
            return Err(Divergence::KindMismatch {
                left_kind: sx.kind(),
                right_kind: sy.kind(),
            });
        }

        match (sx, sy) {
            (Shape::Scalar(Scalar::Float(a)), Shape::Scalar(Scalar::Float(b)))
                if a.is_nan() && b.is_nan() =>
            {
                Ok(())
            }
            (Shape::Scalar(a), Shape::Scalar(b)) => {
                if a == b {
                    Ok(())
                } else {
                    Err(Divergence::ValueMismatch {
                        type_name: x.type_info().name(),
                        left: render(x),
                        right: render(y),
                    })
                }
            }
            (Shape::Array(a), Shape::Array(b)) => self.sequences(a, b, sx, depth),
            (Shape::Slice(a), Shape::Slice(b)) => match (a, b) {
                (None, None) => Ok(()),
                (Some(a), Some(b)) => {
                    if a.len() == b.len() && a.storage() == b.storage() {
                        return Ok(());
                    }
                    self.sequences(a, b, sx, depth)
                }
                _ => Err(nil_mismatch(x, y, sx)),
            },
            (Shape::Interface(a), Shape::Interface(b)) => match (a, b) {
                (None, None) => Ok(()),
                (Some(a), Some(b)) => self.deep_value_equal(a, b, depth + 1),
                _ => Err(nil_mismatch(x, y, sx)),
            },
            (Shape::Pointer(a), Shape::Pointer(b)) => match (a, b) {
                (None, None) => Ok(()),
                (Some(a), Some(b)) => {
                    if address(a) == address(b) {
                        return Ok(());
                    }
                    self.deep_value_equal(a, b, depth + 1)
                }
                _ => Err(nil_mismatch(x, y, sx)),
            },
            (Shape::Record(a), Shape::Record(b)) => self.records(a, b, depth),
            (Shape::Map(a), Shape::Map(b)) => match (a, b) {
                (None, None) => Ok(()),
                (Some(a), Some(b)) => self.maps(a, b, depth),
                _ => Err(nil_mismatch(x, y, sx)),
            },
            (Shape::Func { nil: true }, Shape::Func { nil: true }) => Ok(()),
            (Shape::Func { .. }, Shape::Func { .. }) => Err(Divergence::Uncomparable),
            (Shape::Cell(a), Shape::Cell(b)) => {
                let (ax, ay) = (address(x), address(y));
                // the same cell holds the same value; locking it twice would fail
                if ax == ay {
                    return Ok(());
                }
                // a cell this comparison already holds is a cycle, not a lock held elsewhere
                if self.held.contains(&ax) || self.held.contains(&ay) {
                    return self.revisit(x.type_info(), depth);
                }
                self.held.insert(ax);
                self.held.insert(ay);
                let verdict = self.cells(a, b, depth);
                self.held.remove(&ax);
                self.held.remove(&ay);
                verdict
            }
            _ => Err(Divergence::KindMismatch {
                left_kind: sx.kind(),
                right_kind: sy.kind(),
            }),
        }
    }

    fn sequences(
        &mut self,
        a: &dyn SequenceView,
        b: &dyn SequenceView,
        shape: Shape<'_>,
        depth: usize,
    ) -> Verdict {
        if a.len() != b.len() {
            return Err(Divergence::LengthMismatch {
                kind: shape.kind(),
                left_len: a.len(),
                right_len: b.len(),
            });
        }

        for index in 0..a.len() {
            match (a.get(index), b.get(index)) {
                (Some(ex), Some(ey)) => self
                    .deep_value_equal(ex, ey, depth + 1)
                    .map_err(|d| d.at_index(index))?,
                (None, None) => {}
                (ex, ey) => {
                    return Err(Divergence::Inaccessible {
                        left_accessible: ex.is_some(),
                        right_accessible: ey.is_some(),
                    }
                    .at_index(index));
                }
            }
        }
        Ok(())
    }

    fn records(&mut self, a: &dyn RecordView, b: &dyn RecordView, depth: usize) -> Verdict {
        let (va, vb) = (a.variant(), b.variant());
        if va != vb {
            return Err(Divergence::VariantMismatch {
                left: va.unwrap_or("<none>"),
                right: vb.unwrap_or("<none>"),
            });
        }

        let (fa, fb) = (a.fields(), b.fields());
        if fa.len() != fb.len() {
            return Err(Divergence::LengthMismatch {
                kind: Kind::Record,
                left_len: fa.len(),
                right_len: fb.len(),
            });
        }

        for (left, right) in fa.iter().zip(fb.iter()) {
            self.deep_value_equal(left.value, right.value, depth + 1)
                .map_err(|d| d.in_field(left.name))?;
        }
        Ok(())
    }

    fn maps(&mut self, a: &dyn MapView, b: &dyn MapView, depth: usize) -> Verdict {
        if a.len() != b.len() {
            return Err(Divergence::LengthMismatch {
                kind: Kind::Map,
                left_len: a.len(),
                right_len: b.len(),
            });
        }
        if a.storage() == b.storage() {
            return Ok(());
        }

        for entry in a.entries() {
            match b.lookup(entry.key_any) {
                Some(other) => self
                    .deep_value_equal(entry.value, other, depth + 1)
                    .map_err(|d| d.at_key(render(entry.key)))?,
                None => return Err(Divergence::MissingKey.at_key(render(entry.key))),
            }
        }
        Ok(())
    }

    fn cells(&mut self, a: &dyn CellView, b: &dyn CellView, depth: usize) -> Verdict {
        a.inspect(&mut |inner_a| {
            b.inspect(&mut |inner_b| match (inner_a, inner_b) {
                (Some(x), Some(y)) => self.deep_value_equal(x, y, depth + 1),
                (None, None) => Ok(()),
                _ => Err(Divergence::Inaccessible {
                    left_accessible: inner_a.is_some(),
                    right_accessible: inner_b.is_some(),
                }),
            })
        })
    }
}

/// Unwrap `DynValue` at the top level; `None` is the nil value
fn top_level(value: &dyn Reflect) -> Option<&dyn Reflect> {
    let mut current = value;
    while current.type_info() == TypeInfo::of::<DynValue>() {
        match current.reflect() {
            Shape::Interface(inner) => current = inner?,
            _ => break,
        }
    }
    Some(current)
}

fn nil_mismatch(x: &dyn Reflect, y: &dyn Reflect, shape: Shape<'_>) -> Divergence {
    Divergence::NilMismatch {
        kind: shape.kind(),
        left: render(x),
        right: render(y),
    }
}

fn log_cycle_short_circuit(ty: TypeInfo, depth: usize) {
    tracing::trace!(
        component = module_path!(),
        op = schema::OP_DEEP_EQUAL,
        event = schema::EVENT_CYCLE_SHORT_CIRCUIT,
        left_type = ty.name(),
        depth = depth,
    );
}

/// Compare two values with default options
///
/// # Errors
///
/// Returns the first divergence found, wrapped with its path.
///
/// # Example
///
/// ```
/// use deepeq_core::deep_equal;
///
/// assert!(deep_equal(&vec![f64::NAN], &vec![f64::NAN]).is_ok());
///
/// let divergence = deep_equal(&vec![1i32, 2], &vec![1i32, 3]).unwrap_err();
/// assert_eq!(divergence.to_string(), "index 1: values differ: 2 vs 3");
/// ```
pub fn deep_equal(x: &dyn Reflect, y: &dyn Reflect) -> Verdict {
    deep_equal_with(x, y, &CompareOptions::default())
}

/// Compare two values with explicit options
///
/// Emits `start` and then `end` or `end_divergence` through the logging
/// facility.
///
/// # Errors
///
/// Returns the first divergence found, wrapped with its path.
pub fn deep_equal_with(x: &dyn Reflect, y: &dyn Reflect, options: &CompareOptions) -> Verdict {
    let start = Instant::now();
    let left_type = x.type_info().name();
    let right_type = y.type_info().name();
    log_op_start!(
        schema::OP_DEEP_EQUAL,
        left_type = left_type,
        right_type = right_type
    );

    let mut comparator = Comparator::new(options);
    let verdict = comparator.compare(x, y);

    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    match &verdict {
        Ok(()) => {
            log_op_end!(
                schema::OP_DEEP_EQUAL,
                duration_ms = duration_ms,
                visited = comparator.visited(),
                left_type = left_type
            );
        }
        Err(divergence) => {
            log_op_divergence!(
                schema::OP_DEEP_EQUAL,
                divergence,
                duration_ms = duration_ms,
                left_type = left_type
            );
        }
    }
    verdict
}

/// `true` when the values are deeply equal
pub fn is_deep_equal(x: &dyn Reflect, y: &dyn Reflect) -> bool {
    deep_equal(x, y).is_ok()
}

/// Assert that two values are deeply equal
///
/// On failure the panic message carries the divergence and both values.
///
/// ```
/// use deepeq_core::assert_deep_eq;
///
/// assert_deep_eq!(vec!["a".to_string()], vec!["a".to_string()]);
/// assert_deep_eq!(Some(1u8), Some(1u8), "options should match");
/// ```
#[macro_export]
macro_rules! assert_deep_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                if let ::std::result::Result::Err(divergence) =
                    $crate::deep_equal(left_val, right_val)
                {
                    panic!(
                        "assertion `left deep== right` failed\n  divergence: {}\n  left: {}\n right: {}",
                        divergence,
                        $crate::format::render(left_val),
                        $crate::format::render(right_val),
                    );
                }
            }
        }
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                if let ::std::result::Result::Err(divergence) =
                    $crate::deep_equal(left_val, right_val)
                {
                    panic!(
                        "assertion `left deep== right` failed: {}\n  divergence: {}\n  left: {}\n right: {}",
                        format_args!($($arg)+),
                        divergence,
                        $crate::format::render(left_val),
                        $crate::format::render(right_val),
                    );
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DivergenceKind;
    use std::collections::HashMap;

    #[test]
    fn test_visit_is_order_independent() {
        let ty = TypeId::of::<u8>();
        assert_eq!(Visit::new(1, 2, ty), Visit::new(2, 1, ty));
        assert_ne!(Visit::new(1, 2, ty), Visit::new(1, 2, TypeId::of::<u16>()));
    }

    #[test]
    fn test_top_level_unwraps_dyn_value() {
        let nil = DynValue::nil();
        assert!(top_level(&nil).is_none());

        let nested = DynValue::new(DynValue::new(5u8));
        let inner = top_level(&nested).unwrap();
        assert_eq!(inner.type_info(), TypeInfo::of::<u8>());

        let plain = 5u8;
        assert!(top_level(&plain).is_some());
    }

    #[test]
    fn test_scalars() {
        assert!(deep_equal(&1u32, &1u32).is_ok());
        let err = deep_equal(&1u32, &2u32).unwrap_err();
        assert_eq!(err.kind(), DivergenceKind::ValueMismatch);
        assert_eq!(err.to_string(), "values differ: 1 vs 2");
    }

    #[test]
    fn test_top_level_type_mismatch() {
        let err = deep_equal(&1u32, &1u64).unwrap_err();
        assert_eq!(err.kind(), DivergenceKind::TypeMismatch);
    }

    #[test]
    fn test_visited_counts_reference_like_pairs() {
        let options = CompareOptions::default();
        let mut comparator = Comparator::new(&options);

        assert!(comparator.compare(&(1u8, 2u8), &(1u8, 2u8)).is_ok());
        assert_eq!(comparator.visited(), 0);

        let mut a = HashMap::new();
        a.insert(1u8, vec![1u8]);
        let mut b = HashMap::new();
        b.insert(1u8, vec![1u8]);
        assert!(comparator.compare(&a, &b).is_ok());
        // the map pair and the slice pair under key 1
        assert_eq!(comparator.visited(), 2);
    }

    #[test]
    fn test_depth_limit() {
        let options = CompareOptions::default().with_max_depth(1);
        let shallow = vec![1u8];
        assert!(deep_equal_with(&shallow, &shallow.clone(), &options).is_ok());

        let deep = vec![vec![1u8]];
        let err = deep_equal_with(&deep, &deep.clone(), &options).unwrap_err();
        assert_eq!(err.kind(), DivergenceKind::DepthExceeded);
        assert_eq!(err.path_string(), "[0][0]");
    }

    #[test]
    fn test_assert_deep_eq_passes() {
        crate::assert_deep_eq!(vec![1u8, 2], vec![1u8, 2]);
        crate::assert_deep_eq!(f64::NAN, f64::NAN, "NaN equals itself");
    }

    #[test]
    #[should_panic(expected = "divergence: index 0: values differ: 1 vs 2")]
    fn test_assert_deep_eq_panics_with_divergence() {
        crate::assert_deep_eq!(vec![1u8], vec![2u8]);
    }
}
