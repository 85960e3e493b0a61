use crate::encoder::sql::statement::InsertTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// Nothing buffered; the next tuple starts a new statement.
    Empty,
    /// A statement header and at least one tuple are buffered.
    Accumulating,
}

/// A finished `INSERT` statement ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushedBatch {
    pub sql: Vec<u8>,
    /// Number of row tuples in the statement
    pub tuples: usize,
    /// Buffer length when the flush was decided, before the trailer
    pub size_at_flush: usize,
}

/// Accumulates rendered row tuples into size-bounded `INSERT` statements.
///
/// The threshold is an at-least bound checked after each tuple is appended:
/// every flush but the last is at least `threshold` bytes and may overshoot
/// by up to one tuple. A zero threshold flushes after every row. Does no
/// I/O; the caller writes whatever comes back.
#[derive(Debug)]
pub struct BatchBuffer {
    template: InsertTemplate,
    threshold: usize,
    buf: Vec<u8>,
    needs_comma: bool,
    tuples: usize,
}

impl BatchBuffer {
    pub fn new(template: InsertTemplate, threshold: usize) -> Self {
        Self {
            template,
            threshold,
            buf: Vec::new(),
            needs_comma: false,
            tuples: 0,
        }
    }

    pub fn state(&self) -> BatchState {
        if self.buf.is_empty() {
            BatchState::Empty
        } else {
            BatchState::Accumulating
        }
    }

    /// Append one rendered tuple; returns the finished statement when the
    /// buffer has reached the threshold.
    pub fn push(&mut self, tuple: &[u8]) -> Option<FlushedBatch> {
        if self.buf.is_empty() {
            self.buf.extend_from_slice(&self.template.header);
        }
        if self.needs_comma {
            self.buf.extend_from_slice(b",\n");
        }
        self.buf.extend_from_slice(tuple);
        self.needs_comma = true;
        self.tuples += 1;

        if self.buf.len() >= self.threshold {
            Some(self.flush())
        } else {
            None
        }
    }

    /// Flush whatever is left once the row source is exhausted.
    pub fn finish(&mut self) -> Option<FlushedBatch> {
        if self.buf.is_empty() {
            None
        } else {
            Some(self.flush())
        }
    }

    fn flush(&mut self) -> FlushedBatch {
        let size_at_flush = self.buf.len();
        self.buf.extend_from_slice(&self.template.trailer);

        let capacity = self.buf.capacity();
        let sql = std::mem::replace(&mut self.buf, Vec::with_capacity(capacity));
        let tuples = std::mem::take(&mut self.tuples);
        self.needs_comma = false;

        FlushedBatch {
            sql,
            tuples,
            size_at_flush,
        }
    }
}
