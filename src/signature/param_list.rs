//! Ordered parameter lists and the split-at-first-match operation.

use std::fmt::{self, Display, Formatter};
use std::ops::Index;

use smallvec::SmallVec;

use super::TypeTag;
use crate::error::ConstructionError;

/// Parameters held inline before spilling to the heap.
const INLINE_PARAMS: usize = 6;

/// An ordered sequence of parameter types.
///
/// # Examples
///
/// ```rust
/// use callgraft::signature::{ParamList, TypeTag};
///
/// let params = ParamList::from_iter([TypeTag::of::<i32>(), TypeTag::of::<String>()]);
/// assert_eq!(params.len(), 2);
/// assert_eq!(params.to_string(), "(i32, alloc::string::String)");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ParamList {
    tags: SmallVec<[TypeTag; INLINE_PARAMS]>,
}

/// The result of splitting a [`ParamList`] around its first match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Split {
    /// Parameters preceding the match.
    pub before: ParamList,
    /// Position of the match in the original list.
    pub index: usize,
    /// Parameters following the match, the match itself excluded.
    pub after: ParamList,
}

impl ParamList {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns the tag at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TypeTag> {
        self.tags.get(index)
    }

    /// Returns the leading tag, if any.
    #[must_use]
    pub fn first(&self) -> Option<&TypeTag> {
        self.tags.first()
    }

    /// Iterates over the tags in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TypeTag> {
        self.tags.iter()
    }

    /// Position of the leftmost tag equal to `target`.
    #[must_use]
    pub fn position(&self, target: &TypeTag) -> Option<usize> {
        self.tags.iter().position(|tag| tag == target)
    }

    /// Number of tags equal to `target`.
    #[must_use]
    pub fn count(&self, target: &TypeTag) -> usize {
        self.tags.iter().filter(|tag| *tag == target).count()
    }

    /// Splits the list around the leftmost occurrence of `target`.
    ///
    /// Later occurrences are left inside `after`; a caller that needs the
    /// second occurrence splits `after` again.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::TypeNotFound`] when `target` is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use callgraft::signature::{ParamList, TypeTag};
    ///
    /// let params = ParamList::from_iter([
    ///     TypeTag::of::<u8>(),
    ///     TypeTag::of::<i32>(),
    ///     TypeTag::of::<bool>(),
    ///     TypeTag::of::<i32>(),
    /// ]);
    /// let split = params.split(&TypeTag::of::<i32>()).unwrap();
    ///
    /// assert_eq!(split.index, 1);
    /// assert_eq!(split.before.len(), 1);
    /// assert_eq!(split.after.len(), 2);
    /// assert!(params.split(&TypeTag::of::<char>()).is_err());
    /// ```
    pub fn split(&self, target: &TypeTag) -> Result<Split, ConstructionError> {
        let index = self
            .position(target)
            .ok_or_else(|| ConstructionError::type_not_found(*target, self.clone()))?;
        Ok(Split {
            before: self.tags[..index].iter().copied().collect(),
            index,
            after: self.tags[index + 1..].iter().copied().collect(),
        })
    }

    /// Returns a copy with the tag at `index` removed.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn without(&self, index: usize) -> Self {
        let mut tags = self.tags.clone();
        tags.remove(index);
        Self { tags }
    }

    /// Returns a copy with the tag at `index` replaced by all of `middle`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn splice(&self, index: usize, middle: &Self) -> Self {
        self.tags[..index]
            .iter()
            .chain(middle.iter())
            .chain(self.tags[index + 1..].iter())
            .copied()
            .collect()
    }
}

impl FromIterator<TypeTag> for ParamList {
    fn from_iter<I: IntoIterator<Item = TypeTag>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ParamList {
    type Item = &'a TypeTag;
    type IntoIter = std::slice::Iter<'a, TypeTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl Index<usize> for ParamList {
    type Output = TypeTag;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tags[index]
    }
}

impl Display for ParamList {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("(")?;
        for (position, tag) in self.tags.iter().enumerate() {
            if position > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{tag}")?;
        }
        formatter.write_str(")")
    }
}

/// Declared parameters and result of a callable.
///
/// Fixed when the callable is built and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    params: ParamList,
    result: TypeTag,
}

impl Signature {
    /// Creates a signature.
    #[must_use]
    pub const fn new(params: ParamList, result: TypeTag) -> Self {
        Self { params, result }
    }

    /// Declared parameters, in call order.
    #[must_use]
    pub const fn params(&self) -> &ParamList {
        &self.params
    }

    /// Declared result.
    #[must_use]
    pub const fn result(&self) -> &TypeTag {
        &self.result
    }

    /// Number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Display for Signature {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} -> {}", self.params, self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tags(list: &ParamList) -> Vec<TypeTag> {
        list.iter().copied().collect()
    }

    fn sample() -> ParamList {
        ParamList::from_iter([
            TypeTag::of::<u8>(),
            TypeTag::of::<i32>(),
            TypeTag::of::<bool>(),
            TypeTag::of::<i32>(),
            TypeTag::of::<char>(),
        ])
    }

    #[rstest]
    fn split_uses_the_leftmost_match() {
        let split = sample().split(&TypeTag::of::<i32>()).unwrap();

        assert_eq!(split.index, 1);
        assert_eq!(tags(&split.before), vec![TypeTag::of::<u8>()]);
        assert_eq!(
            tags(&split.after),
            vec![
                TypeTag::of::<bool>(),
                TypeTag::of::<i32>(),
                TypeTag::of::<char>()
            ]
        );
    }

    #[rstest]
    fn second_split_over_after_finds_the_second_occurrence() {
        let first = sample().split(&TypeTag::of::<i32>()).unwrap();
        let second = first.after.split(&TypeTag::of::<i32>()).unwrap();

        assert_eq!(tags(&second.before), vec![TypeTag::of::<bool>()]);
        assert_eq!(tags(&second.after), vec![TypeTag::of::<char>()]);
    }

    #[rstest]
    fn split_at_edges() {
        let leading = sample().split(&TypeTag::of::<u8>()).unwrap();
        assert!(leading.before.is_empty());
        assert_eq!(leading.after.len(), 4);

        let trailing = sample().split(&TypeTag::of::<char>()).unwrap();
        assert_eq!(trailing.before.len(), 4);
        assert!(trailing.after.is_empty());
    }

    #[rstest]
    fn split_reports_missing_target() {
        let error = sample().split(&TypeTag::of::<f64>()).unwrap_err();
        assert_eq!(
            error,
            ConstructionError::type_not_found(TypeTag::of::<f64>(), sample())
        );
    }

    #[rstest]
    fn split_of_empty_list_fails() {
        assert!(ParamList::new().split(&TypeTag::of::<u8>()).is_err());
    }

    #[rstest]
    fn splice_replaces_one_slot_in_place() {
        let middle = ParamList::from_iter([TypeTag::of::<String>(), TypeTag::of::<f32>()]);
        let spliced = sample().splice(2, &middle);

        assert_eq!(
            tags(&spliced),
            vec![
                TypeTag::of::<u8>(),
                TypeTag::of::<i32>(),
                TypeTag::of::<String>(),
                TypeTag::of::<f32>(),
                TypeTag::of::<i32>(),
                TypeTag::of::<char>(),
            ]
        );
    }

    #[rstest]
    fn splice_with_empty_middle_removes_the_slot() {
        assert_eq!(sample().splice(0, &ParamList::new()), sample().without(0));
    }

    #[rstest]
    fn count_sees_every_occurrence() {
        assert_eq!(sample().count(&TypeTag::of::<i32>()), 2);
        assert_eq!(sample().count(&TypeTag::of::<f64>()), 0);
    }

    #[rstest]
    fn signature_display() {
        let signature = Signature::new(
            ParamList::from_iter([TypeTag::of::<i32>(), TypeTag::of::<i32>()]),
            TypeTag::of::<i32>(),
        );
        assert_eq!(signature.to_string(), "(i32, i32) -> i32");
        assert_eq!(signature.arity(), 2);
    }
}
