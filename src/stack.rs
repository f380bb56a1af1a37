/// A growable last-in-first-out stack.
///
/// Used by the postfix converter (holding operator tokens) and the
/// evaluator (holding intermediate values). Underflow is reported as
/// `None` rather than an error; callers translate absence into their own
/// error kind (e.g. "not enough operands").
///
/// # Examples
///
/// ```
/// use sift_lang::Stack;
///
/// let mut s = Stack::new();
/// s.push(1);
/// s.push(2);
/// assert_eq!(s.peek(), Some(&2));
/// assert_eq!(s.pop(), Some(2));
/// assert_eq!(s.pop(), Some(1));
/// assert_eq!(s.pop(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Stack<T> {
    values: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Stack { values: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push(&mut self, value: T) {
        self.values.push(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.values.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.values.last()
    }
}
