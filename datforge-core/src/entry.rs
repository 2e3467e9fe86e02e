use serde::{Deserialize, Serialize};

/// Duplicate status assigned during bucketing.
///
/// This is provenance, not identity: it never participates in equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DupeStatus {
    /// Not known to duplicate another entry.
    #[default]
    None,
    /// Duplicates an earlier entry from the same source collection.
    Exact,
    /// Duplicates an earlier entry from a different source collection.
    External,
}

/// Dump status of a ROM or disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DumpStatus {
    /// The DAT did not say.
    #[default]
    Unknown,
    /// Known to exist but no verified dump is available.
    Nodump,
    /// A verified dump exists.
    Good,
}

/// Discriminant of a [`CatalogEntry`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Rom,
    Disk,
    Release,
    BiosSet,
    Sample,
    Archive,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rom => "rom",
            Self::Disk => "disk",
            Self::Release => "release",
            Self::BiosSet => "biosset",
            Self::Sample => "sample",
            Self::Archive => "archive",
        }
    }
}

/// Provenance and shared descriptive data carried by every entry variant.
///
/// None of these fields participate in identity equality.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryMeta {
    pub dupe: DupeStatus,
    /// Owning machine, by id and by name. Kept in sync via
    /// [`CatalogEntry::set_machine`].
    pub machine_id: i64,
    pub machine_name: String,
    /// Source collection this entry was read from.
    pub source_id: i64,
    pub source_name: String,
    pub supported: Option<bool>,
    pub publisher: Option<String>,
    /// Free-form name/value info pairs from the DAT.
    pub infos: Vec<(String, String)>,
    pub part_name: Option<String>,
    pub part_interface: Option<String>,
    /// Free-form name/value feature pairs from the DAT.
    pub features: Vec<(String, String)>,
    pub area_name: Option<String>,
    pub area_size: Option<i64>,
}

/// A ROM entry: size plus up to three content hashes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rom {
    pub name: String,
    /// Size in bytes, -1 when the DAT doesn't declare one.
    pub size: i64,
    /// CRC32 as lower-case hex, empty when absent.
    pub crc: String,
    /// MD5 as lower-case hex, empty when absent.
    pub md5: String,
    /// SHA1 as lower-case hex, empty when absent.
    pub sha1: String,
    pub status: DumpStatus,
    /// Name of the parent ROM this one merges into, if any.
    pub merge: Option<String>,
    pub date: Option<String>,
    pub meta: EntryMeta,
}

impl Default for Rom {
    fn default() -> Self {
        Self {
            name: String::new(),
            size: -1,
            crc: String::new(),
            md5: String::new(),
            sha1: String::new(),
            status: DumpStatus::default(),
            merge: None,
            date: None,
            meta: EntryMeta::default(),
        }
    }
}

impl Rom {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A disk (CHD-style) entry: hashed but sizeless.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Disk {
    pub name: String,
    pub md5: String,
    pub sha1: String,
    pub status: DumpStatus,
    pub merge: Option<String>,
    pub meta: EntryMeta,
}

impl Disk {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A regional release of the owning machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Release {
    pub name: String,
    pub region: Option<String>,
    pub language: Option<String>,
    pub date: Option<String>,
    pub default: Option<bool>,
    pub meta: EntryMeta,
}

/// A selectable BIOS option of the owning machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BiosSet {
    pub name: String,
    pub description: Option<String>,
    pub default: Option<bool>,
    pub meta: EntryMeta,
}

/// An audio sample name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sample {
    pub name: String,
    pub meta: EntryMeta,
}

/// An archive name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Archive {
    pub name: String,
    pub meta: EntryMeta,
}

/// One identity record within a machine.
///
/// Equality is identity equality: same variant and all of that variant's
/// identity fields equal, case-sensitive. Provenance ([`EntryMeta`]) and
/// rebuild metadata (`merge`, Rom `date`) are excluded, so two catalogs can
/// agree on an entry while disagreeing on where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CatalogEntry {
    Rom(Rom),
    Disk(Disk),
    Release(Release),
    BiosSet(BiosSet),
    Sample(Sample),
    Archive(Archive),
}

impl CatalogEntry {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Rom(_) => ItemKind::Rom,
            Self::Disk(_) => ItemKind::Disk,
            Self::Release(_) => ItemKind::Release,
            Self::BiosSet(_) => ItemKind::BiosSet,
            Self::Sample(_) => ItemKind::Sample,
            Self::Archive(_) => ItemKind::Archive,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Rom(r) => &r.name,
            Self::Disk(d) => &d.name,
            Self::Release(r) => &r.name,
            Self::BiosSet(b) => &b.name,
            Self::Sample(s) => &s.name,
            Self::Archive(a) => &a.name,
        }
    }

    pub fn meta(&self) -> &EntryMeta {
        match self {
            Self::Rom(r) => &r.meta,
            Self::Disk(d) => &d.meta,
            Self::Release(r) => &r.meta,
            Self::BiosSet(b) => &b.meta,
            Self::Sample(s) => &s.meta,
            Self::Archive(a) => &a.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut EntryMeta {
        match self {
            Self::Rom(r) => &mut r.meta,
            Self::Disk(d) => &mut d.meta,
            Self::Release(r) => &mut r.meta,
            Self::BiosSet(b) => &mut b.meta,
            Self::Sample(s) => &mut s.meta,
            Self::Archive(a) => &mut a.meta,
        }
    }

    /// Set the owning machine, keeping id and name in sync.
    pub fn set_machine(&mut self, id: i64, name: impl Into<String>) {
        let meta = self.meta_mut();
        meta.machine_id = id;
        meta.machine_name = name.into();
    }

    /// Set the source collection, keeping id and name in sync.
    pub fn set_source(&mut self, id: i64, name: impl Into<String>) {
        let meta = self.meta_mut();
        meta.source_id = id;
        meta.source_name = name.into();
    }
}

impl PartialEq for CatalogEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rom(a), Self::Rom(b)) => {
                a.name == b.name
                    && a.size == b.size
                    && a.crc == b.crc
                    && a.md5 == b.md5
                    && a.sha1 == b.sha1
                    && a.status == b.status
            }
            (Self::Disk(a), Self::Disk(b)) => {
                a.name == b.name && a.md5 == b.md5 && a.sha1 == b.sha1 && a.status == b.status
            }
            (Self::Release(a), Self::Release(b)) => {
                a.name == b.name
                    && a.region == b.region
                    && a.language == b.language
                    && a.date == b.date
                    && a.default == b.default
            }
            (Self::BiosSet(a), Self::BiosSet(b)) => {
                a.name == b.name && a.description == b.description && a.default == b.default
            }
            (Self::Sample(a), Self::Sample(b)) => a.name == b.name,
            (Self::Archive(a), Self::Archive(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl Eq for CatalogEntry {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rom() -> Rom {
        Rom {
            name: "a.bin".into(),
            size: 262144,
            crc: "ba58ed29".into(),
            md5: "4187a797e33bc96a96993220da6f09f7".into(),
            sha1: "56fe858d1035dce4b68520f457a0858bae7bb16d".into(),
            ..Rom::default()
        }
    }

    #[test]
    fn test_rom_identity_fields() {
        let a = CatalogEntry::Rom(sample_rom());
        let b = CatalogEntry::Rom(sample_rom());
        assert_eq!(a, b);

        // Flipping any single identity field breaks equality
        let mut changed = sample_rom();
        changed.name = "b.bin".into();
        assert_ne!(a, CatalogEntry::Rom(changed));

        let mut changed = sample_rom();
        changed.size = 262145;
        assert_ne!(a, CatalogEntry::Rom(changed));

        let mut changed = sample_rom();
        changed.crc = "00000000".into();
        assert_ne!(a, CatalogEntry::Rom(changed));

        let mut changed = sample_rom();
        changed.sha1 = String::new();
        assert_ne!(a, CatalogEntry::Rom(changed));

        let mut changed = sample_rom();
        changed.status = DumpStatus::Nodump;
        assert_ne!(a, CatalogEntry::Rom(changed));
    }

    #[test]
    fn test_provenance_never_affects_equality() {
        let a = CatalogEntry::Rom(sample_rom());

        let mut b = CatalogEntry::Rom(sample_rom());
        b.set_machine(7, "some machine");
        b.set_source(3, "other.dat");
        b.meta_mut().dupe = DupeStatus::External;
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        let a = CatalogEntry::Sample(Sample {
            name: "Jump".into(),
            ..Sample::default()
        });
        let b = CatalogEntry::Sample(Sample {
            name: "jump".into(),
            ..Sample::default()
        });
        assert_ne!(a, b);
    }

    #[test]
    fn test_variants_never_equal_across_kinds() {
        // Same name, different variant: never equal
        let sample = CatalogEntry::Sample(Sample {
            name: "a.bin".into(),
            ..Sample::default()
        });
        let archive = CatalogEntry::Archive(Archive {
            name: "a.bin".into(),
            ..Archive::default()
        });
        assert_ne!(sample, archive);
        assert_ne!(CatalogEntry::Rom(sample_rom()), sample);
    }

    #[test]
    fn test_merge_and_date_are_not_identity() {
        let a = CatalogEntry::Rom(sample_rom());

        let mut rom = sample_rom();
        rom.merge = Some("parent.bin".into());
        rom.date = Some("1989-01-01".into());
        assert_eq!(a, CatalogEntry::Rom(rom));
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original = CatalogEntry::Rom(sample_rom());
        let copy = original.clone();
        original.set_machine(99, "mutated");

        assert_eq!(copy.meta().machine_id, 0);
        assert_eq!(copy.meta().machine_name, "");
    }

    #[test]
    fn test_default_rom_size_is_unknown() {
        let rom = Rom::new("x.bin");
        assert_eq!(rom.size, -1);
        assert!(rom.crc.is_empty());
        assert_eq!(rom.status, DumpStatus::Unknown);
    }
}
