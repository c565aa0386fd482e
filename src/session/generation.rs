/// Identifies one issued request. Later requests compare greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic source of [`RequestToken`]s; zero is never issued.
#[derive(Debug)]
pub struct RequestGeneration {
    next: u64,
}

impl Default for RequestGeneration {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl RequestGeneration {
    pub fn next(&mut self) -> RequestToken {
        let token = self.next;
        self.next = self.next.wrapping_add(1).max(1);
        RequestToken(token)
    }
}
