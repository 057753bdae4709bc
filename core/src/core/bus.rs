use std::cmp::Ordering;

use thiserror::Error;

use crate::device::{AddressSpan, SharedDevice};

/// Number of addressable words in the LC-3 address space.
pub const NUM_ADDRESSES: usize = 0x1_0000;

/// Errors surfaced by [`Bus::attach`].
#[derive(Debug, Error)]
pub enum BusError {
    /// A device interval intersects an interval that is already mapped.
    /// Nothing is attached when this is returned.
    #[error("device interval {low:#06x}..={high:#06x} conflicts with an existing attachment")]
    AddressConflict { low: u16, high: u16 },
}

#[derive(Clone, Copy, Default)]
struct Cell {
    value: u16,
    device: bool,
}

struct Attachment {
    low: u16,
    high: u16,
    device: SharedDevice,
}

/// A flat 16-bit address space with a selective device overlay.
///
/// Every cell is backed by RAM; cells covered by a device attachment carry
/// a flag that routes `read`/`write` to the owning device instead. The
/// attachment list is kept sorted by interval low endpoint so point lookup
/// is a binary search with a three-way interval comparator.
///
/// Invariants: attachment intervals are pairwise disjoint, and a cell is
/// flagged iff exactly one attachment covers it.
pub struct Bus {
    cells: Box<[Cell]>,
    attachments: Vec<Attachment>,
}

impl Bus {
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::default(); NUM_ADDRESSES].into_boxed_slice(),
            attachments: Vec::new(),
        }
    }

    /// Map a device's declared addresses into the address space.
    ///
    /// All of the device's intervals are validated against the existing
    /// attachments before any of them is inserted, so a conflict leaves
    /// the bus untouched.
    pub fn attach(&mut self, device: SharedDevice) -> Result<(), BusError> {
        let intervals = match device.borrow().addresses() {
            AddressSpan::Range { low, high } => vec![(low, high)],
            AddressSpan::Separate(addresses) => {
                addresses.iter().map(|&addr| (addr, addr)).collect()
            }
        };
        for (i, &(low, high)) in intervals.iter().enumerate() {
            let conflict = self.overlaps(low, high)
                // Malformed spans can also conflict with themselves.
                || intervals[..i].iter().any(|&(l, h)| low <= h && high >= l);
            if conflict {
                return Err(BusError::AddressConflict { low, high });
            }
        }
        for (low, high) in intervals {
            log::debug!("bus: mapping {low:#06x}..={high:#06x}");
            self.attachments.push(Attachment {
                low,
                high,
                device: device.clone(),
            });
            for addr in low..=high {
                self.cells[addr as usize].device = true;
            }
        }
        self.attachments.sort_by_key(|attachment| attachment.low);
        Ok(())
    }

    /// Read one word, dispatching to the owning device for mapped cells.
    pub fn read(&mut self, address: u16) -> u16 {
        if self.cells[address as usize].device {
            let Some(attachment) = self.find(address) else {
                unreachable!("device-flagged cell without an attachment");
            };
            attachment.device.borrow_mut().read_register(address)
        } else {
            self.cells[address as usize].value
        }
    }

    /// Write one word. Device writes are forwarded to the owning device and
    /// never touch the underlying RAM cell.
    pub fn write(&mut self, address: u16, value: u16) {
        if self.cells[address as usize].device {
            let Some(attachment) = self.find(address) else {
                unreachable!("device-flagged cell without an attachment");
            };
            attachment.device.borrow_mut().write_register(address, value);
        } else {
            self.cells[address as usize].value = value;
        }
    }

    /// Read the RAM cell directly, bypassing device dispatch. Used by the
    /// debugger to inspect memory without side effects.
    pub fn read_memory(&self, address: u16) -> u16 {
        self.cells[address as usize].value
    }

    /// Whether `address` is covered by a device attachment.
    pub fn is_device(&self, address: u16) -> bool {
        self.cells[address as usize].device
    }

    fn overlaps(&self, low: u16, high: u16) -> bool {
        self.attachments
            .iter()
            .take_while(|attachment| attachment.low <= high)
            .any(|attachment| attachment.high >= low)
    }

    fn find(&self, address: u16) -> Option<&Attachment> {
        self.attachments
            .binary_search_by(|attachment| {
                if attachment.high < address {
                    Ordering::Less
                } else if attachment.low > address {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .ok()
            .map(|index| &self.attachments[index])
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
