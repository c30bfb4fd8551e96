//! Fixed-capacity circular buffer shared by every sender/receiver
//! window. Capacity equals [`QUEUE_MAX_SIZE`], which is also the
//! sequence-number space, so a slot's position in the ring *is* its
//! sequence number modulo the space: callers that know a sequence
//! number can address its slot directly with [`RingBuffer::get`] /
//! [`RingBuffer::get_mut`] / [`RingBuffer::set`] without translating
//! through `front`.

use super::config::QUEUE_MAX_SIZE;

#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    front: usize,
    rear: usize,
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RingBuffer<T> {
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(QUEUE_MAX_SIZE);
        slots.resize_with(QUEUE_MAX_SIZE, || None);
        RingBuffer {
            slots,
            front: 0,
            rear: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        QUEUE_MAX_SIZE
    }

    pub fn front(&self) -> usize {
        self.front
    }

    pub fn rear(&self) -> usize {
        self.rear
    }

    pub fn is_empty(&self) -> bool {
        self.front == self.rear
    }

    pub fn is_full(&self) -> bool {
        (self.rear + 1) % QUEUE_MAX_SIZE == self.front
    }

    /// Occupancy: number of slots between `front` and `rear`.
    pub fn len(&self) -> usize {
        (self.rear + QUEUE_MAX_SIZE - self.front) % QUEUE_MAX_SIZE
    }

    /// Enqueues at `rear`, advancing it. No-op (returns `false`) if full.
    pub fn enqueue(&mut self, item: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots[self.rear] = Some(item);
        self.rear = (self.rear + 1) % QUEUE_MAX_SIZE;
        true
    }

    /// Dequeues from `front`, clearing the slot and advancing `front`.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.slots[self.front].take();
        self.front = (self.front + 1) % QUEUE_MAX_SIZE;
        item
    }

    pub fn peek(&self) -> Option<&T> {
        self.slots[self.front].as_ref()
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.slots[idx % QUEUE_MAX_SIZE].as_ref()
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots[idx % QUEUE_MAX_SIZE].as_mut()
    }

    /// Writes directly into a slot without touching `front`/`rear`.
    /// Used by the SR receiver to buffer out-of-order arrivals, whose
    /// slot is addressed by sequence number rather than FIFO order.
    pub fn set(&mut self, idx: usize, item: T) {
        self.slots[idx % QUEUE_MAX_SIZE] = Some(item);
    }

    /// Forces `rear` to an absolute index. Used by the SR receiver to
    /// extend the reserved range when an out-of-order arrival lands
    /// further from `front` than the current `rear`.
    pub fn set_rear(&mut self, idx: usize) {
        self.rear = idx % QUEUE_MAX_SIZE;
    }

    /// Snapshot of occupied slots as `(sequence_number, item)` pairs,
    /// from `front` to `rear`, taken before a send/retransmit pass so
    /// that pass never mutates the structure it is iterating.
    pub fn snapshot(&self) -> Vec<(usize, T)>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        let mut i = self.front;
        while i != self.rear {
            if let Some(item) = &self.slots[i] {
                out.push((i, item.clone()));
            }
            i = (i + 1) % QUEUE_MAX_SIZE;
        }
        out
    }
}
