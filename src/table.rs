use std::ops::Index;

use log::debug;

use crate::utils::MyHash;

#[derive(Clone)]
struct Entry<T> {
    value: T,
    next: usize,
}

/// Hash-consing table: an append-only arena whose cells are chained into buckets.
///
/// Index 0 is a sentry cell and never holds a real value, so `0` doubles as the
/// "end of chain" marker. Cells are never removed, hence indices are stable for
/// the whole lifetime of the table.
pub struct Table<T> {
    data: Vec<Entry<T>>,
    buckets: Vec<usize>,
    bitmask: u64,
}

impl<T> Table<T>
where
    T: Default,
{
    /// Create a new table with room for `2^bits` values before the first reallocation.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Storage bits should be in the range 0..=31");

        let capacity = 1 << bits;
        let mut data = Vec::with_capacity(capacity);
        data.push(Entry {
            value: T::default(),
            next: 0,
        });

        let buckets_bits = bits.clamp(1, 20);
        let buckets_size = 1usize << buckets_bits;

        Self {
            data,
            buckets: vec![0; buckets_size],
            bitmask: (buckets_size - 1) as u64,
        }
    }
}

impl<T> Table<T> {
    /// Number of values stored in the table.
    pub fn len(&self) -> usize {
        self.data.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of hash buckets.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> &T {
        assert_ne!(index, 0, "Index is 0");
        &self.data[index].value
    }

    /// Get the index of the next cell in the same bucket.
    pub fn next(&self, index: usize) -> usize {
        assert_ne!(index, 0, "Index is 0");
        self.data[index].next
    }

    /// Add a new value to the table (without hash-consing) and return its index.
    fn add(&mut self, value: T) -> usize {
        let index = self.data.len();
        assert!(index <= i32::MAX as usize, "Storage is full");
        self.data.push(Entry { value, next: 0 });
        index
    }
}

impl<T> Table<T>
where
    T: MyHash,
{
    fn bucket_index(&self, value: &T) -> usize {
        (value.hash() & self.bitmask) as usize
    }

    /// Put a value into the table and return its index.
    ///
    /// If an equal value is already present, its index is returned and nothing is allocated.
    pub fn put(&mut self, value: T) -> usize
    where
        T: Eq,
    {
        let bucket_index = self.bucket_index(&value);
        let mut index = self.buckets[bucket_index];

        while index != 0 {
            if &value == self.value(index) {
                return index;
            }
            index = self.next(index);
        }

        let i = self.add(value);
        self.data[i].next = self.buckets[bucket_index];
        self.buckets[bucket_index] = i;

        if self.len() > 2 * self.buckets.len() {
            self.grow_buckets();
        }

        i
    }

    /// Double the number of buckets and relink every cell.
    fn grow_buckets(&mut self) {
        let size = self.buckets.len() * 2;
        debug!("table: growing buckets to {}", size);
        self.buckets = vec![0; size];
        self.bitmask = (size - 1) as u64;
        for i in 1..self.data.len() {
            let b = self.bucket_index(&self.data[i].value);
            self.data[i].next = self.buckets[b];
            self.buckets[b] = i;
        }
    }
}

impl<T> Index<usize> for Table<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.value(index)
    }
}
