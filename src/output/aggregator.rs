/// Accumulates rendered fragments in the order they are appended
///
/// Fragments are never reordered, filtered or deduplicated; result ranking
/// is the order of `append` calls.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    fragments: Vec<String>,
}

impl ResultAggregator {
    /// Creates an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rendered fragment
    pub fn append(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    /// Number of fragments appended so far
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true when nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The appended fragments, in order
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Concatenates the header followed by every fragment
    pub fn build(&self, header: &str) -> String {
        let capacity = header.len() + self.fragments.iter().map(String::len).sum::<usize>();
        let mut document = String::with_capacity(capacity);
        document.push_str(header);
        for fragment in &self.fragments {
            document.push_str(fragment);
        }
        document
    }
}
