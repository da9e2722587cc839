// 16-bit virtual addresses: 10 page bits followed by 6 offset bits
pub const ADDRESS_BITS: u32 = 16;
pub const OFFSET_BITS: u32 = 6;
pub const PAGE_BITS: u32 = ADDRESS_BITS - OFFSET_BITS;

pub const PAGE_SIZE: usize = 1 << OFFSET_BITS;
pub const MAX_PAGES: usize = 1 << PAGE_BITS;

pub const OFFSET_MASK: u32 = (1 << OFFSET_BITS) - 1;
pub const PAGE_MASK: u32 = (1 << PAGE_BITS) - 1;
pub const PAGE_SHIFT: u32 = OFFSET_BITS;

// physical memory defaults
pub const DEFAULT_NUM_FRAMES: usize = 512;
pub const DEFAULT_MAX_FRAMES: usize = 10;
