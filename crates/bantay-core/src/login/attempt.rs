#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptId(pub u64);

impl std::fmt::Display for AttemptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct AttemptSeq {
    next: u64,
}

impl AttemptSeq {
    pub fn next_id(&mut self) -> AttemptId {
        let id = AttemptId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}
