use abstractions::IUsizeAlias;
use address::{FrameNum, PhysicalAddress, VirtualAddress};
use constants::FRAME_SIZE;
use frame_pool::FramePool;
use log::debug;

use crate::pte::{PtEntry, PteFlags};

/// Entries per directory or table frame.
pub const ENTRIES_PER_TABLE: usize = FRAME_SIZE / core::mem::size_of::<PtEntry>();

/// Bytes of address space covered by one full page table.
pub const TABLE_SPAN_BYTES: usize = ENTRIES_PER_TABLE * FRAME_SIZE;

/// Two-level boot page table over the identity-mapped prefix of the address
/// space.
///
/// Construction takes one frame for the directory and one for the initial
/// table, which identity-maps the shared prefix (one full table's span).
/// Later mappings allocate further table frames on demand. Only single-frame
/// requests are ever issued against the pool.
pub struct BootPageTable {
    directory: PhysicalAddress,
}

impl BootPageTable {
    pub fn new(pool: &mut FramePool) -> BootPageTable {
        let directory_frame = Self::take_frame(pool);
        let table_frame = Self::take_frame(pool);

        // Identity-map the shared prefix through the initial table.
        let table = Self::table_at(table_frame.start_addr());
        for (i, entry) in table.iter_mut().enumerate() {
            let paddr = PhysicalAddress::from_usize(i * FRAME_SIZE);
            *entry = PtEntry::new(paddr, PteFlags::PRESENT | PteFlags::WRITABLE);
        }

        let directory = Self::table_at(directory_frame.start_addr());
        directory[0] = PtEntry::new(
            table_frame.start_addr(),
            PteFlags::PRESENT | PteFlags::WRITABLE,
        );
        for entry in directory[1..].iter_mut() {
            *entry = PtEntry::vacant();
        }

        debug!("boot page table constructed in frame {}", directory_frame);

        BootPageTable {
            directory: directory_frame.start_addr(),
        }
    }

    /// Identity-maps the page containing `vaddr`, taking a fresh page-table
    /// frame from `pool` when the directory slot is still vacant.
    pub fn map_page(&mut self, pool: &mut FramePool, vaddr: VirtualAddress) {
        let directory = Self::table_at(self.directory);
        let slot = &mut directory[Self::directory_index(vaddr)];

        let table = if slot.is_present() {
            Self::table_at(slot.paddr())
        } else {
            let frame = Self::take_frame(pool);
            let table = Self::table_at(frame.start_addr());
            for entry in table.iter_mut() {
                *entry = PtEntry::vacant();
            }
            *slot = PtEntry::new(frame.start_addr(), PteFlags::PRESENT | PteFlags::WRITABLE);
            table
        };

        let paddr = PhysicalAddress::from_usize(vaddr.as_usize() & !(FRAME_SIZE - 1));
        table[Self::table_index(vaddr)] = PtEntry::new(paddr, PteFlags::PRESENT | PteFlags::WRITABLE);
    }

    /// Physical address `vaddr` currently maps to, if any.
    pub fn translate(&self, vaddr: VirtualAddress) -> Option<PhysicalAddress> {
        let directory = Self::table_at(self.directory);
        let slot = directory[Self::directory_index(vaddr)];
        if !slot.is_present() {
            return None;
        }

        let entry = Self::table_at(slot.paddr())[Self::table_index(vaddr)];
        if !entry.is_present() {
            return None;
        }

        Some(entry.paddr() + vaddr.page_offset())
    }

    /// Physical address of the page directory, the value a CR3 load takes.
    pub fn root(&self) -> PhysicalAddress {
        self.directory
    }

    /// Loads the directory into CR3. Only exists on the machine itself.
    #[cfg(all(target_os = "none", target_arch = "x86"))]
    pub fn activate(&self) {
        unsafe {
            core::arch::asm!("mov cr3, {}", in(reg) self.directory.as_usize());
        }
    }

    fn take_frame(pool: &mut FramePool) -> FrameNum {
        pool.get_frames(1)
            .expect("out of frames for boot page table")
    }

    fn table_at(addr: PhysicalAddress) -> &'static mut [PtEntry] {
        addr.as_mut_slice::<PtEntry>(ENTRIES_PER_TABLE)
    }

    fn directory_index(vaddr: VirtualAddress) -> usize {
        let index = vaddr.page_number() / ENTRIES_PER_TABLE;
        assert!(
            index < ENTRIES_PER_TABLE,
            "virtual address beyond the boot-mapped space"
        );
        index
    }

    fn table_index(vaddr: VirtualAddress) -> usize {
        vaddr.page_number() % ENTRIES_PER_TABLE
    }
}

#[cfg(test)]
mod boot_page_table_tests {
    use super::*;
    use test_utilities::TestMemory;

    fn pool_over(mem: &TestMemory) -> FramePool {
        unsafe { FramePool::new(mem.base_frame(), mem.n_frames(), None) }
    }

    #[test]
    fn test_construction_shape() {
        let mem = TestMemory::new(64);
        let mut pool = pool_over(&mem);
        let free_before = pool.free_frames();

        let pt = BootPageTable::new(&mut pool);

        // One frame for the directory, one for the initial table.
        assert_eq!(pool.free_frames(), free_before - 2);

        let directory = pt.root().as_slice::<PtEntry>(ENTRIES_PER_TABLE);
        assert!(directory[0].is_present());
        for entry in directory[1..].iter() {
            assert!(!entry.is_present());
            assert_eq!(entry.flags(), PteFlags::WRITABLE);
        }
    }

    #[test]
    fn test_shared_prefix_is_identity_mapped() {
        let mem = TestMemory::new(64);
        let mut pool = pool_over(&mem);
        let pt = BootPageTable::new(&mut pool);

        for page in [0usize, 1, ENTRIES_PER_TABLE / 2, ENTRIES_PER_TABLE - 1] {
            let vaddr = VirtualAddress::from_usize(page * FRAME_SIZE + 0x123);
            let paddr = pt.translate(vaddr).unwrap();
            assert_eq!(paddr.as_usize(), page * FRAME_SIZE + 0x123);
        }

        // The first page outside the prefix is not mapped.
        let beyond = VirtualAddress::from_usize(TABLE_SPAN_BYTES);
        assert_eq!(pt.translate(beyond), None);
    }

    #[test]
    fn test_map_page_allocates_tables_on_demand() {
        let mem = TestMemory::new(64);
        let mut pool = pool_over(&mem);
        let mut pt = BootPageTable::new(&mut pool);
        let free_before = pool.free_frames();

        let vaddr = VirtualAddress::from_usize(3 * TABLE_SPAN_BYTES + 5 * FRAME_SIZE);
        pt.map_page(&mut pool, vaddr);

        // A fresh table frame was taken for the third directory slot.
        assert_eq!(pool.free_frames(), free_before - 1);
        assert_eq!(
            pt.translate(vaddr),
            Some(PhysicalAddress::from_usize(3 * TABLE_SPAN_BYTES + 5 * FRAME_SIZE))
        );

        // A second page behind the same slot reuses the table.
        let neighbor = VirtualAddress::from_usize(3 * TABLE_SPAN_BYTES + 6 * FRAME_SIZE);
        pt.map_page(&mut pool, neighbor);
        assert_eq!(pool.free_frames(), free_before - 1);
        assert!(pt.translate(neighbor).is_some());

        // Pages nobody mapped stay unmapped.
        let untouched = VirtualAddress::from_usize(3 * TABLE_SPAN_BYTES + 7 * FRAME_SIZE);
        assert_eq!(pt.translate(untouched), None);
    }
}
