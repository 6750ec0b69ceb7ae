use abstractions::IUsizeAlias;
use address::PhysicalAddress;
use constants::FRAME_SIZE;

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PteFlags: usize {
        const PRESENT = 1 << 0;
        const WRITABLE = 1 << 1;
    }
}

/// One entry of the boot page directory or one of its page tables: a
/// frame-aligned physical address in the high bits, flags in the low bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct PtEntry(usize);

impl PtEntry {
    const FLAGS_MASK: usize = FRAME_SIZE - 1;

    /// An unused slot: writable once something gets mapped there, but not
    /// present.
    pub const fn vacant() -> PtEntry {
        PtEntry(PteFlags::WRITABLE.bits())
    }

    pub fn new(paddr: PhysicalAddress, flags: PteFlags) -> PtEntry {
        debug_assert!(paddr.is_frame_aligned());
        PtEntry(paddr.as_usize() | flags.bits())
    }

    pub fn paddr(&self) -> PhysicalAddress {
        PhysicalAddress::from_usize(self.0 & !Self::FLAGS_MASK)
    }

    pub fn flags(&self) -> PteFlags {
        PteFlags::from_bits_truncate(self.0)
    }

    pub fn is_present(&self) -> bool {
        self.flags().contains(PteFlags::PRESENT)
    }
}

#[cfg(test)]
mod pte_tests {
    use super::*;

    #[test]
    fn test_entry_round_trip() {
        let paddr = PhysicalAddress::from_usize(0x0040_0000);
        let entry = PtEntry::new(paddr, PteFlags::PRESENT | PteFlags::WRITABLE);

        assert_eq!(entry.paddr(), paddr);
        assert_eq!(entry.flags(), PteFlags::PRESENT | PteFlags::WRITABLE);
        assert!(entry.is_present());
    }

    #[test]
    fn test_vacant_entry() {
        let entry = PtEntry::vacant();

        assert!(!entry.is_present());
        assert_eq!(entry.flags(), PteFlags::WRITABLE);
        assert!(entry.paddr().is_null());
    }
}
