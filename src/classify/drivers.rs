//! Driver Classification Table
//!
//! Static mapping from lowercase driver names to their classification:
//! storage class, driver kind, origin, and an optional FUSE descriptor hint
//! for userspace filesystems that also appear under kernel-level names.
//!
//! FUSE-backed drivers with a `fuse.`-prefixed or `-fuse`-suffixed fstab
//! spelling are kept as distinct independent keys; the classifier, not this
//! table, reconstructs the relationship by pattern matching, because fstab
//! spellings vary.
//!
//! An *absent* name is a meaningful lookup result distinct from an
//! *ambiguous* (empty) entry: `zfs`, `btrfs`, `dm`, and `md` are known
//! names that cannot be classified as filesystem vs. volume manager
//! without more context.

use crate::model::StorageClass;
use std::collections::HashMap;
use std::sync::LazyLock;

// =============================================================================
// Classification Entry
// =============================================================================

/// Sub-kind of a filesystem driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    Regular,
    Virtual,
    Overlay,
    Network,
    Fuse,
}

/// Where a virtual filesystem's contents come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverOrigin {
    Kernel,
    Memory,
    Hypervisor,
}

/// Classification for one known driver name. All fields optional; an entry
/// with every field unset denotes an ambiguous driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverEntry {
    pub class: Option<StorageClass>,
    pub kind: Option<DriverKind>,
    pub origin: Option<DriverOrigin>,
    /// FUSE backend subtype, for drivers that are FUSE implementations
    /// regardless of how the mount table spells them.
    pub fuse_subtype: Option<&'static str>,
}

impl DriverEntry {
    /// Known name, but could be either a filesystem or a volume manager.
    pub const AMBIGUOUS: DriverEntry = DriverEntry {
        class: None,
        kind: None,
        origin: None,
        fuse_subtype: None,
    };

    const fn filesystem(kind: DriverKind) -> Self {
        DriverEntry {
            class: Some(StorageClass::Filesystem),
            kind: Some(kind),
            origin: None,
            fuse_subtype: None,
        }
    }

    const fn regular() -> Self {
        Self::filesystem(DriverKind::Regular)
    }

    const fn virtual_fs(origin: DriverOrigin) -> Self {
        DriverEntry {
            origin: Some(origin),
            ..Self::filesystem(DriverKind::Virtual)
        }
    }

    const fn overlay() -> Self {
        Self::filesystem(DriverKind::Overlay)
    }

    const fn network() -> Self {
        Self::filesystem(DriverKind::Network)
    }

    const fn fuse(kind: DriverKind, subtype: &'static str) -> Self {
        DriverEntry {
            fuse_subtype: Some(subtype),
            ..Self::filesystem(kind)
        }
    }

    /// True when this name is known but deliberately unclassified.
    pub fn is_ambiguous(&self) -> bool {
        self.class.is_none() && self.kind.is_none() && self.origin.is_none()
            && self.fuse_subtype.is_none()
    }

    /// True when this driver is a FUSE implementation (carries a subtype).
    pub fn is_fuse_backed(&self) -> bool {
        self.fuse_subtype.is_some()
    }
}

// =============================================================================
// Table
// =============================================================================

use DriverKind::{Network, Overlay, Regular};
use DriverOrigin::{Hypervisor, Kernel, Memory};

/// Shorthand for an overlay-class FUSE driver under both fstab spellings.
macro_rules! overlay_fuse {
    ($name:literal) => {
        ($name, DriverEntry::fuse(Overlay, $name))
    };
    ($name:literal, $subtype:literal) => {
        ($name, DriverEntry::fuse(Overlay, $subtype))
    };
}

static TABLE: &[(&str, DriverEntry)] = &[
    // Regular filesystems (typically backed by block devices)
    ("ext2", DriverEntry::regular()),
    ("ext3", DriverEntry::regular()),
    ("ext4", DriverEntry::regular()),
    ("xfs", DriverEntry::regular()),
    ("apfs", DriverEntry::regular()),
    ("ufs", DriverEntry::regular()),
    ("ffs", DriverEntry::regular()),
    ("hfs", DriverEntry::regular()),
    ("hfsplus", DriverEntry::regular()),
    ("jfs", DriverEntry::regular()),
    ("reiserfs", DriverEntry::regular()),
    ("f2fs", DriverEntry::regular()),
    ("nilfs2", DriverEntry::regular()),
    ("ocfs2", DriverEntry::regular()),
    ("gfs2", DriverEntry::regular()),
    ("vfat", DriverEntry::regular()),
    ("msdos", DriverEntry::regular()),
    ("exfat", DriverEntry::regular()),
    ("ntfs", DriverEntry::regular()),
    ("ntfs3", DriverEntry::regular()),
    ("bcachefs", DriverEntry::regular()),
    ("iso9660", DriverEntry::regular()),
    ("udf", DriverEntry::regular()),
    ("squashfs", DriverEntry::regular()),
    ("erofs", DriverEntry::regular()),
    // Kernel API / interface filesystems
    ("proc", DriverEntry::virtual_fs(Kernel)),
    ("procfs", DriverEntry::virtual_fs(Kernel)),
    ("sysfs", DriverEntry::virtual_fs(Kernel)),
    ("devfs", DriverEntry::virtual_fs(Kernel)),
    ("devpts", DriverEntry::virtual_fs(Kernel)),
    ("devtmpfs", DriverEntry::virtual_fs(Kernel)),
    ("debugfs", DriverEntry::virtual_fs(Kernel)),
    ("securityfs", DriverEntry::virtual_fs(Kernel)),
    ("selinuxfs", DriverEntry::virtual_fs(Kernel)),
    ("cgroup", DriverEntry::virtual_fs(Kernel)),
    ("cgroup2", DriverEntry::virtual_fs(Kernel)),
    ("pstore", DriverEntry::virtual_fs(Kernel)),
    ("efivarfs", DriverEntry::virtual_fs(Kernel)),
    ("configfs", DriverEntry::virtual_fs(Kernel)),
    ("hugetlbfs", DriverEntry::virtual_fs(Kernel)),
    ("mqueue", DriverEntry::virtual_fs(Kernel)),
    ("bpf", DriverEntry::virtual_fs(Kernel)),
    ("tracefs", DriverEntry::virtual_fs(Kernel)),
    ("binfmt_misc", DriverEntry::virtual_fs(Kernel)),
    ("rpc_pipefs", DriverEntry::virtual_fs(Kernel)),
    ("nsfs", DriverEntry::virtual_fs(Kernel)),
    ("nfsd", DriverEntry::virtual_fs(Kernel)),
    ("fdescfs", DriverEntry::virtual_fs(Kernel)),
    // Memory-backed filesystems
    ("tmpfs", DriverEntry::virtual_fs(Memory)),
    ("ramfs", DriverEntry::virtual_fs(Memory)),
    // Automounter
    ("autofs", DriverEntry::filesystem(DriverKind::Virtual)),
    // Host/guest integration
    ("vboxsf", DriverEntry::virtual_fs(Hypervisor)),
    ("vmhgfs", DriverEntry::virtual_fs(Hypervisor)),
    // Union / merge filesystems
    ("overlay", DriverEntry::overlay()),
    ("overlayfs", DriverEntry::overlay()),
    ("aufs", DriverEntry::overlay()),
    ("unionfs", DriverEntry::overlay()),
    overlay_fuse!("unionfs-fuse", "unionfs"),
    overlay_fuse!("fuse.unionfs", "unionfs"),
    overlay_fuse!("mergerfs"),
    overlay_fuse!("fuse.mergerfs", "mergerfs"),
    overlay_fuse!("mhddfs"),
    overlay_fuse!("fuse.mhddfs", "mhddfs"),
    // Transform / re-mapping filesystems
    overlay_fuse!("bindfs"),
    overlay_fuse!("fuse.bindfs", "bindfs"),
    ("nullfs", DriverEntry::overlay()),
    overlay_fuse!("encfs"),
    overlay_fuse!("fuse.encfs", "encfs"),
    overlay_fuse!("gocryptfs"),
    overlay_fuse!("fuse.gocryptfs", "gocryptfs"),
    overlay_fuse!("cryfs"),
    overlay_fuse!("fuse.cryfs", "cryfs"),
    ("ecryptfs", DriverEntry::overlay()),
    overlay_fuse!("fusecompress"),
    overlay_fuse!("fuse.fusecompress", "fusecompress"),
    overlay_fuse!("compfused"),
    overlay_fuse!("fuse.compfused", "compfused"),
    // Isolation / container-specific
    overlay_fuse!("lxcfs"),
    overlay_fuse!("fuse.lxcfs", "lxcfs"),
    ("shiftfs", DriverEntry::overlay()),
    // Snapshot / copy-on-write
    overlay_fuse!("translucentfs"),
    overlay_fuse!("fuse.translucentfs", "translucentfs"),
    // Network filesystems
    ("nfs", DriverEntry::network()),
    ("nfs4", DriverEntry::network()),
    ("smbfs", DriverEntry::network()),
    ("cifs", DriverEntry::network()),
    ("afs", DriverEntry::network()),
    ("coda", DriverEntry::network()),
    ("ncpfs", DriverEntry::network()),
    ("sshfs", DriverEntry::fuse(Network, "sshfs")),
    ("fuse.sshfs", DriverEntry::fuse(Network, "sshfs")),
    ("glusterfs", DriverEntry::network()),
    ("ceph", DriverEntry::network()),
    ("9p", DriverEntry::network()), // virtfs
    ("smb3", DriverEntry::network()),
    ("lustre", DriverEntry::network()),
    ("orangefs", DriverEntry::network()),
    ("pmxfs", DriverEntry::network()),
    // FUSE NTFS (kernel-backed is 'ntfs' or 'ntfs3')
    ("ntfs-3g", DriverEntry::fuse(Regular, "ntfs3-g")),
    // FUSE framework itself
    ("fuse", DriverEntry::filesystem(DriverKind::Fuse)),
    ("osxfuse", DriverEntry::filesystem(DriverKind::Fuse)),
    ("osxfusefs", DriverEntry::filesystem(DriverKind::Fuse)),
    ("macfuse", DriverEntry::filesystem(DriverKind::Fuse)),
    // Ambiguous: could be a filesystem or a volume manager
    ("zfs", DriverEntry::AMBIGUOUS),
    ("btrfs", DriverEntry::AMBIGUOUS),
    ("dm", DriverEntry::AMBIGUOUS),
    ("md", DriverEntry::AMBIGUOUS),
];

static STORAGE_DRIVERS: LazyLock<HashMap<&'static str, &'static DriverEntry>> =
    LazyLock::new(|| TABLE.iter().map(|(name, entry)| (*name, entry)).collect());

/// Look up a lowercase driver name. `None` means the name is unknown, which
/// is distinct from a known-but-ambiguous entry.
pub fn lookup(name: &str) -> Option<&'static DriverEntry> {
    STORAGE_DRIVERS.get(name).copied()
}

/// All known driver names.
pub fn known_drivers() -> impl Iterator<Item = &'static str> {
    TABLE.iter().map(|(name, _)| *name)
}
