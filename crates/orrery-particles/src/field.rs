//! Field rules: a particle field's value source

use crate::random;
use std::fmt;
use std::rc::Rc;

/// Where a configurable particle field gets its value from.
///
/// Rules are resolved on every (re)initialization, so a `Generated` rule
/// re-rolls each time a particle respawns while a `Fixed` rule never changes.
pub enum FieldRule<T> {
    Fixed(T),
    Generated(Rc<dyn Fn() -> T>),
}

impl<T: Clone> FieldRule<T> {
    pub fn fixed(value: T) -> Self {
        FieldRule::Fixed(value)
    }

    pub fn generated(f: impl Fn() -> T + 'static) -> Self {
        FieldRule::Generated(Rc::new(f))
    }

    /// Produce this rule's value for one initialization
    pub fn resolve(&self) -> T {
        match self {
            FieldRule::Fixed(value) => value.clone(),
            FieldRule::Generated(f) => f(),
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, FieldRule::Generated(_))
    }
}

impl FieldRule<f64> {
    /// Uniform float in [min, max)
    pub fn range(min: f64, max: f64) -> Self {
        Self::generated(move || random::random_float(min, max))
    }

    /// Uniform whole number in [min, max]
    pub fn int_range(min: i64, max: i64) -> Self {
        Self::generated(move || random::random_int(min, max) as f64)
    }
}

impl<T> Clone for FieldRule<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        match self {
            FieldRule::Fixed(value) => FieldRule::Fixed(value.clone()),
            FieldRule::Generated(f) => FieldRule::Generated(Rc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for FieldRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRule::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            FieldRule::Generated(_) => f.write_str("Generated(..)"),
        }
    }
}

impl<T> From<T> for FieldRule<T> {
    fn from(value: T) -> Self {
        FieldRule::Fixed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn fixed_resolves_to_same_value() {
        let rule = FieldRule::fixed(2.5);
        assert_eq!(rule.resolve(), 2.5);
        assert_eq!(rule.resolve(), 2.5);
        assert!(!rule.is_generated());
    }

    #[test]
    fn generated_runs_on_every_resolve() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let rule = FieldRule::generated(move || {
            counter.set(counter.get() + 1);
            counter.get() as f64
        });
        assert_eq!(rule.resolve(), 1.0);
        assert_eq!(rule.resolve(), 2.0);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn clones_share_the_generator() {
        let rule = FieldRule::range(1.0, 3.0);
        let copy = rule.clone();
        for _ in 0..100 {
            let v = copy.resolve();
            assert!((1.0..3.0).contains(&v));
        }
        assert!(copy.is_generated());
    }

    #[test]
    fn int_range_yields_whole_numbers() {
        let rule = FieldRule::int_range(0, 5);
        for _ in 0..100 {
            let v = rule.resolve();
            assert_eq!(v.fract(), 0.0);
            assert!((0.0..=5.0).contains(&v));
        }
    }

    #[test]
    fn from_value_is_fixed() {
        let rule: FieldRule<f64> = 4.0.into();
        assert!(matches!(rule, FieldRule::Fixed(v) if v == 4.0));
    }

    #[test]
    fn debug_hides_generator() {
        assert_eq!(format!("{:?}", FieldRule::fixed(1)), "Fixed(1)");
        assert_eq!(format!("{:?}", FieldRule::generated(|| 1)), "Generated(..)");
    }
}
