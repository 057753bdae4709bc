use std::cell::RefCell;
use std::rc::Rc;

use lc3sim_core::core::bus::{Bus, BusError};
use lc3sim_core::core::host::Host;
use lc3sim_core::device::{AddressSpan, Device};

/// Recording device: serves reads from `value`, logs every access.
struct TestDevice {
    range: bool,
    low: u16,
    high: u16,
    value: u16,
    reads: Vec<u16>,
    writes: Vec<(u16, u16)>,
}

impl TestDevice {
    fn range(low: u16, high: u16) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            range: true,
            low,
            high,
            value: 0,
            reads: Vec::new(),
            writes: Vec::new(),
        }))
    }

    fn separate(low: u16, high: u16) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            range: false,
            low,
            high,
            value: 0,
            reads: Vec::new(),
            writes: Vec::new(),
        }))
    }
}

impl Device for TestDevice {
    fn start(&mut self, _host: Host) {}

    fn read_register(&mut self, address: u16) -> u16 {
        self.reads.push(address);
        self.value
    }

    fn write_register(&mut self, address: u16, value: u16) {
        self.writes.push((address, value));
    }

    fn addresses(&self) -> AddressSpan {
        if self.range {
            AddressSpan::Range {
                low: self.low,
                high: self.high,
            }
        } else {
            AddressSpan::Separate(vec![self.low, self.high])
        }
    }
}

// =============================================================================
// RAM behavior
// =============================================================================

#[test]
fn test_memory_starts_zeroed() {
    let bus = Bus::new();
    assert_eq!(bus.read_memory(0x0000), 0);
    assert_eq!(bus.read_memory(0x3000), 0);
    assert_eq!(bus.read_memory(0xFFFF), 0);
}

#[test]
fn test_ram_write_read_round_trip() {
    let mut bus = Bus::new();
    bus.write(0x3000, 0xBEEF);
    assert_eq!(bus.read(0x3000), 0xBEEF);
    assert_eq!(bus.read_memory(0x3000), 0xBEEF);
}

#[test]
fn test_addresses_default_to_ram() {
    let bus = Bus::new();
    assert!(!bus.is_device(0x3000));
    assert!(!bus.is_device(0xFE00));
}

// =============================================================================
// Attachment and dispatch
// =============================================================================

#[test]
fn test_range_attachment_flags_every_covered_cell() {
    let mut bus = Bus::new();
    bus.attach(TestDevice::range(0xFE00, 0xFE07)).unwrap();
    for addr in 0xFE00..=0xFE07 {
        assert!(bus.is_device(addr), "cell {addr:#06x} should be flagged");
    }
    assert!(!bus.is_device(0xFDFF));
    assert!(!bus.is_device(0xFE08));
}

#[test]
fn test_separate_attachment_flags_only_listed_cells() {
    let mut bus = Bus::new();
    bus.attach(TestDevice::separate(0xFE00, 0xFE02)).unwrap();
    assert!(bus.is_device(0xFE00));
    assert!(!bus.is_device(0xFE01));
    assert!(bus.is_device(0xFE02));
}

#[test]
fn test_read_dispatches_to_owning_device() {
    let mut bus = Bus::new();
    let device = TestDevice::range(0xFE00, 0xFE03);
    device.borrow_mut().value = 0x8000;
    bus.attach(device.clone()).unwrap();
    assert_eq!(bus.read(0xFE02), 0x8000);
    assert_eq!(device.borrow().reads, vec![0xFE02]);
}

#[test]
fn test_write_forwards_to_device_and_preserves_ram_cell() {
    let mut bus = Bus::new();
    let device = TestDevice::range(0xFE04, 0xFE07);
    bus.attach(device.clone()).unwrap();
    bus.write(0xFE06, 0x0041);
    assert_eq!(device.borrow().writes, vec![(0xFE06, 0x0041)]);
    // The underlying cell is never written through device dispatch.
    assert_eq!(bus.read_memory(0xFE06), 0);
}

#[test]
fn test_read_memory_never_invokes_device() {
    let mut bus = Bus::new();
    let device = TestDevice::range(0xFE00, 0xFE03);
    device.borrow_mut().value = 0x1234;
    bus.attach(device.clone()).unwrap();
    assert_eq!(bus.read_memory(0xFE01), 0);
    assert!(device.borrow().reads.is_empty());
}

#[test]
fn test_lookup_picks_the_right_device_among_many() {
    let mut bus = Bus::new();
    let first = TestDevice::range(0xFE00, 0xFE01);
    let second = TestDevice::range(0xFE04, 0xFE05);
    let third = TestDevice::range(0xFFFE, 0xFFFE);
    first.borrow_mut().value = 1;
    second.borrow_mut().value = 2;
    third.borrow_mut().value = 3;
    // Attach out of address order to exercise the resort.
    bus.attach(third.clone()).unwrap();
    bus.attach(first.clone()).unwrap();
    bus.attach(second.clone()).unwrap();
    assert_eq!(bus.read(0xFE00), 1);
    assert_eq!(bus.read(0xFE05), 2);
    assert_eq!(bus.read(0xFFFE), 3);
}

// =============================================================================
// Conflicts
// =============================================================================

#[test]
fn test_overlapping_range_is_rejected() {
    let mut bus = Bus::new();
    bus.attach(TestDevice::range(0xFE00, 0xFE07)).unwrap();
    let err = bus.attach(TestDevice::range(0xFE04, 0xFE0B)).unwrap_err();
    let BusError::AddressConflict { low, high } = err;
    assert_eq!((low, high), (0xFE04, 0xFE0B));
}

#[test]
fn test_conflicting_attach_leaves_bus_untouched() {
    let mut bus = Bus::new();
    bus.attach(TestDevice::range(0xFE02, 0xFE03)).unwrap();
    // First listed address is free, second collides: nothing of the new
    // device may be mapped afterwards.
    let rejected = TestDevice::separate(0xFE00, 0xFE02);
    assert!(bus.attach(rejected.clone()).is_err());
    assert!(!bus.is_device(0xFE00));
    bus.write(0xFE00, 7);
    assert_eq!(bus.read(0xFE00), 7);
    assert!(rejected.borrow().writes.is_empty());
}

#[test]
fn test_adjacent_ranges_do_not_conflict() {
    let mut bus = Bus::new();
    bus.attach(TestDevice::range(0xFE00, 0xFE03)).unwrap();
    bus.attach(TestDevice::range(0xFE04, 0xFE07)).unwrap();
    assert!(bus.is_device(0xFE03));
    assert!(bus.is_device(0xFE04));
}
