// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

pub trait IdentifierMarkerName: Copy {
    const NAME: &'static str;
}

#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier<I, U>(I, core::marker::PhantomData<U>);

impl<I, U> Identifier<I, U> {
    #[inline]
    pub fn new(id: I) -> Self {
        Self(id, core::marker::PhantomData)
    }

    #[inline]
    pub fn value(&self) -> &I {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> I {
        self.0
    }
}

impl<I, U> std::fmt::Display for Identifier<I, U>
where
    I: std::fmt::Display,
    U: IdentifierMarkerName,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", U::NAME, self.0)
    }
}

impl<I, U> serde::Serialize for Identifier<I, U>
where
    I: serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Stock grade marker. A batch holds exactly two grades.
pub trait Grade: Copy + Clone + std::fmt::Debug {
    const NAME: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NewGrade;

impl Grade for NewGrade {
    const NAME: &'static str = "New";
}

impl std::fmt::Display for NewGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Self::NAME)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OldGrade;

impl Grade for OldGrade {
    const NAME: &'static str = "Old";
}

impl std::fmt::Display for OldGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Self::NAME)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{grade} stock must be non-negative, got {quantity}")]
pub struct NegativeStockError {
    grade: &'static str,
    quantity: i64,
}

impl NegativeStockError {
    #[inline]
    pub fn new(grade: &'static str, quantity: i64) -> Self {
        Self { grade, quantity }
    }

    #[inline]
    pub fn grade(&self) -> &'static str {
        self.grade
    }

    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// Available units of a single grade.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stock<G: Grade>(i64, core::marker::PhantomData<G>);

pub type NewStock = Stock<NewGrade>;
pub type OldStock = Stock<OldGrade>;

impl<G: Grade> Stock<G> {
    #[inline]
    pub fn new(quantity: i64) -> Result<Self, NegativeStockError> {
        if quantity < 0 {
            return Err(NegativeStockError::new(G::NAME, quantity));
        }
        Ok(Self(quantity, core::marker::PhantomData))
    }

    #[inline]
    pub fn zero() -> Self {
        Self(0, core::marker::PhantomData)
    }

    #[inline]
    pub fn quantity(&self) -> i64 {
        self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl<G: Grade> std::fmt::Display for Stock<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} stock: {}", G::NAME, self.0)
    }
}
