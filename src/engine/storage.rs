//! Type-erased, dense column storage.
//!
//! A [`ColumnStorage`] holds one component type's data for every row of one
//! archetype, as a single contiguous byte buffer:
//!
//! ```text
//! width = 8
//! | row 0 (8 bytes) | row 1 (8 bytes) | row 2 (8 bytes) | .. capacity ..
//! ```
//!
//! The column never learns the component's type, only its byte width and
//! alignment. Rows are raw copies of the component value, so components must
//! be plain data ([`bytemuck::Pod`]): no internal pointers and nothing to drop.
//!
//! # Core operations
//!
//! - **Append** (`push_bytes`): copies one row to the end, amortised `O(1)`.
//! - **Remove** (`swap_remove`): overwrites the row with the last row and
//!   shrinks by one, `O(1)`. Order is not preserved.
//! - **Access** (`row`, `row_mut`, `get`, `get_mut`): bounds-checked views of
//!   a single row; typed views go through `bytemuck` which re-checks size and
//!   alignment.
//!
//! # Safety and invariants
//!
//! The buffer is allocated with the component's alignment, and `width` is a
//! multiple of that alignment, so every row starts on an aligned address.
//!
//! - `length <= capacity`
//! - bytes `0 .. length * width` are initialized
//! - zero-width columns never allocate; `data` is then a dangling, aligned pointer
//!
//! Row views borrow the column, so a pointer into a row cannot outlive the
//! next mutation of that column.

use std::alloc::{self, Layout};
use std::ptr::{self, NonNull};
use std::slice;

use bytemuck::Pod;


/// Dense byte array for one component type within one archetype.
pub struct ColumnStorage {
    data: NonNull<u8>,
    width: usize,
    align: usize,
    length: usize,
    capacity: usize,
}

// SAFETY: the column uniquely owns its buffer, and the bytes it stores are
// plain data. Sharing follows the usual `&`/`&mut` rules like `Vec<u8>`.
unsafe impl Send for ColumnStorage {}
unsafe impl Sync for ColumnStorage {}

impl ColumnStorage {
    /// Creates an empty column for elements of `width` bytes aligned to `align`.
    ///
    /// ## Panics
    /// Panics if `align` is not a power of two or `width` is not a multiple of it.

    pub fn new(width: usize, align: usize) -> Self {
        assert!(align.is_power_of_two(), "column alignment {align} is not a power of two");
        assert!(width % align == 0, "column width {width} is not a multiple of alignment {align}");

        Self {
            data: dangling(align),
            width,
            align,
            length: 0,
            capacity: if width == 0 { usize::MAX } else { 0 },
        }
    }

    /// Creates an empty column with room for `rows` elements.
    pub fn with_capacity(width: usize, align: usize, rows: usize) -> Self {
        let mut column = Self::new(width, align);
        column.reserve(rows);
        column
    }

    /// Element width in bytes.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Element alignment in bytes.
    #[inline]
    pub fn align(&self) -> usize {
        self.align
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the column holds no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of rows that fit without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ensures room for at least `additional` more rows.
    pub fn reserve(&mut self, additional: usize) {
        let needed = self
            .length
            .checked_add(additional)
            .unwrap_or_else(|| panic!("column capacity overflow"));
        if needed <= self.capacity {
            return;
        }

        let new_capacity = needed.max(self.capacity.saturating_mul(2)).max(4);
        let new_layout = self.layout_for(new_capacity);

        // SAFETY: `width > 0` here (zero-width columns report `usize::MAX`
        // capacity), so both layouts have a non-zero size. The old layout is
        // exactly the one the current buffer was allocated with.
        let raw = unsafe {
            if self.capacity == 0 {
                alloc::alloc(new_layout)
            } else {
                alloc::realloc(self.data.as_ptr(), self.layout_for(self.capacity), new_layout.size())
            }
        };

        self.data = match NonNull::new(raw) {
            Some(data) => data,
            None => alloc::handle_alloc_error(new_layout),
        };
        self.capacity = new_capacity;
    }

    /// Appends one row copied from `bytes`.
    ///
    /// ## Panics
    /// Panics if `bytes.len()` differs from the column width.

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        assert_eq!(
            bytes.len(),
            self.width,
            "row payload is {} bytes; column width is {}",
            bytes.len(),
            self.width
        );
        self.reserve(1);

        // SAFETY: `reserve` guarantees room for row `length`; the source is a
        // live slice of exactly `width` bytes and cannot overlap our buffer
        // while we hold `&mut self`.
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), self.row_ptr(self.length), self.width);
        }
        self.length += 1;
    }

    /// Appends a typed value.
    #[inline]
    pub fn push<T: Pod>(&mut self, value: T) {
        self.push_bytes(bytemuck::bytes_of(&value));
    }

    /// Bytes of row `index`.
    ///
    /// ## Panics
    /// Panics if `index >= len()`.

    #[inline]
    pub fn row(&self, index: usize) -> &[u8] {
        self.check_bounds(index);
        // SAFETY: in-bounds rows are initialized and lie inside the allocation.
        unsafe { slice::from_raw_parts(self.row_ptr(index), self.width) }
    }

    /// Mutable bytes of row `index`.
    ///
    /// ## Panics
    /// Panics if `index >= len()`.

    #[inline]
    pub fn row_mut(&mut self, index: usize) -> &mut [u8] {
        self.check_bounds(index);
        // SAFETY: as in `row`, and `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.row_ptr(index), self.width) }
    }

    /// Row `index` reinterpreted as `T`.
    ///
    /// ## Panics
    /// Panics if the row is out of bounds or `T` does not match the column's
    /// size and alignment.

    #[inline]
    pub fn get<T: Pod>(&self, index: usize) -> &T {
        bytemuck::from_bytes(self.row(index))
    }

    /// Row `index` reinterpreted as `&mut T`.
    #[inline]
    pub fn get_mut<T: Pod>(&mut self, index: usize) -> &mut T {
        bytemuck::from_bytes_mut(self.row_mut(index))
    }

    /// All initialized bytes, row after row.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: the first `length * width` bytes are initialized; for a
        // zero-width column this is an empty slice at an aligned address.
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.length * self.width) }
    }

    /// All rows as a typed slice.
    ///
    /// ## Panics
    /// Panics if `T`'s size differs from the column width, or its alignment
    /// exceeds the column alignment.

    #[inline]
    pub fn as_slice<T: Pod>(&self) -> &[T] {
        self.check_type::<T>();
        // SAFETY: `check_type` matched size and alignment; the first `length`
        // rows are initialized, and any bit pattern is a valid `Pod` value.
        // Zero-sized `T` reads nothing from the aligned dangling pointer.
        unsafe { slice::from_raw_parts(self.data.as_ptr() as *const T, self.length) }
    }

    /// All rows as a mutable typed slice.
    #[inline]
    pub fn as_slice_mut<T: Pod>(&mut self) -> &mut [T] {
        self.check_type::<T>();
        // SAFETY: as in `as_slice`, and `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr() as *mut T, self.length) }
    }

    /// Removes row `index` by moving the last row into its place.
    ///
    /// Nothing is reported back: the caller knows a different row moved iff
    /// `index < len()` after the call.
    ///
    /// ## Panics
    /// Panics if `index >= len()`.

    pub fn swap_remove(&mut self, index: usize) {
        self.check_bounds(index);
        let last = self.length - 1;
        if index != last {
            // SAFETY: both rows are in bounds and distinct, so the ranges
            // do not overlap.
            unsafe {
                ptr::copy_nonoverlapping(self.row_ptr(last), self.row_ptr(index), self.width);
            }
        }
        self.length = last;
    }

    #[inline]
    fn check_bounds(&self, index: usize) {
        assert!(
            index < self.length,
            "row {index} out of bounds for column of {} rows",
            self.length
        );
    }

    #[inline]
    fn check_type<T>(&self) {
        assert!(
            std::mem::size_of::<T>() == self.width && std::mem::align_of::<T>() <= self.align,
            "`{}` does not match column layout (width {}, align {})",
            std::any::type_name::<T>(),
            self.width,
            self.align
        );
    }

    #[inline]
    fn row_ptr(&self, index: usize) -> *mut u8 {
        debug_assert!(index <= self.capacity);
        // SAFETY: callers only pass `index <= capacity`, which keeps the
        // offset inside (or one past) the allocation.
        unsafe { self.data.as_ptr().add(index * self.width) }
    }

    fn layout_for(&self, rows: usize) -> Layout {
        let size = rows
            .checked_mul(self.width)
            .unwrap_or_else(|| panic!("column capacity overflow"));
        match Layout::from_size_align(size, self.align) {
            Ok(layout) => layout,
            Err(_) => panic!("column of {rows} rows exceeds the addressable size"),
        }
    }
}

impl Drop for ColumnStorage {
    fn drop(&mut self) {
        if self.width != 0 && self.capacity != 0 {
            let layout = self.layout_for(self.capacity);
            // SAFETY: allocated in `reserve` with exactly this layout.
            unsafe { alloc::dealloc(self.data.as_ptr(), layout) };
        }
    }
}

impl std::fmt::Debug for ColumnStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnStorage")
            .field("width", &self.width)
            .field("align", &self.align)
            .field("length", &self.length)
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[inline]
fn dangling(align: usize) -> NonNull<u8> {
    // An address equal to the alignment is non-null and aligned.
    match NonNull::new(align as *mut u8) {
        Some(ptr) => ptr,
        None => NonNull::dangling(),
    }
}
