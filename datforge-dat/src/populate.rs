//! Typed population: canonical tree to catalog model.
//!
//! Field handling is tolerant in the same way the converters are: missing
//! or malformed values fall back to their unknown defaults rather than
//! failing the file.

use datforge_core::{
    Archive, BiosSet, Catalog, CatalogEntry, CatalogHeader, Disk, DumpStatus, ForceMerging,
    ForceNodump, ForcePacking, Machine, MachineType, Release, Rom, Sample,
};

use crate::tree::DatNode;

/// A typed catalog plus the machines its entries reference.
#[derive(Debug, Clone, Default)]
pub struct PopulatedDat {
    pub catalog: Catalog,
    pub machines: Vec<Machine>,
}

/// Build the typed model from a canonical tree.
///
/// Entries are bucketed under their owning machine's name and stamped with
/// the given source collection. Machine ids are indices into the returned
/// machine list.
pub fn populate(tree: &DatNode, source_id: i64, source_name: &str) -> PopulatedDat {
    let mut catalog = Catalog::new();
    let mut machines = Vec::new();

    for node in &tree.children {
        match node.name.as_str() {
            "header" => catalog.header = parse_header(node),
            "game" | "machine" => {
                let machine = parse_machine(node);
                let machine_id = machines.len() as i64;
                for child in &node.children {
                    if let Some(mut entry) = parse_entry(child) {
                        entry.set_machine(machine_id, machine.name.clone());
                        entry.set_source(source_id, source_name);
                        catalog.add_entry(machine.name.clone(), entry);
                    }
                }
                machines.push(machine);
            }
            other => log::debug!("skipping unrecognized node: {other}"),
        }
    }

    PopulatedDat { catalog, machines }
}

fn parse_header(node: &DatNode) -> CatalogHeader {
    CatalogHeader {
        name: node.child_text("name").unwrap_or_default().to_string(),
        description: node
            .child_text("description")
            .unwrap_or_default()
            .to_string(),
        category: node.child_text("category").map(str::to_string),
        version: node.child_text("version").unwrap_or_default().to_string(),
        date: node.child_text("date").map(str::to_string),
        author: node.child_text("author").map(str::to_string),
        email: node.child_text("email").map(str::to_string),
        homepage: node.child_text("homepage").map(str::to_string),
        url: node.child_text("url").map(str::to_string),
        comment: node.child_text("comment").map(str::to_string),
        force_merging: match node.child_text("forcemerging") {
            Some("split") => ForceMerging::Split,
            Some("full") => ForceMerging::Full,
            _ => ForceMerging::None,
        },
        force_nodump: match node.child_text("forcenodump") {
            Some("obsolete") => ForceNodump::Obsolete,
            Some("required") => ForceNodump::Required,
            Some("ignore") => ForceNodump::Ignore,
            _ => ForceNodump::None,
        },
        force_packing: match node.child_text("forcepacking") {
            Some("zip") => ForcePacking::Zip,
            Some("unzip") => ForcePacking::Unzip,
            _ => ForcePacking::None,
        },
        ..CatalogHeader::default()
    }
}

/// Look a field up as an attribute first, then as a child leaf; the block
/// dialect carries most machine fields as leaves, the XML dialect as
/// attributes.
fn field(node: &DatNode, key: &str) -> Option<String> {
    node.attr(key)
        .or_else(|| node.child_text(key))
        .map(str::to_string)
}

fn yes_no(value: Option<String>) -> Option<bool> {
    match value.as_deref() {
        Some("yes") => Some(true),
        Some("no") => Some(false),
        _ => None,
    }
}

fn parse_machine(node: &DatNode) -> Machine {
    let machine_type = if field(node, "isbios").as_deref() == Some("yes") {
        MachineType::Bios
    } else if field(node, "isdevice").as_deref() == Some("yes") {
        MachineType::Device
    } else if field(node, "ismechanical").as_deref() == Some("yes") {
        MachineType::Mechanical
    } else {
        MachineType::Unspecified
    };

    Machine {
        name: field(node, "name").unwrap_or_default(),
        description: node.child_text("description").map(str::to_string),
        comment: field(node, "comment"),
        year: field(node, "year"),
        manufacturer: field(node, "manufacturer"),
        clone_of: field(node, "cloneof"),
        rom_of: field(node, "romof"),
        sample_of: field(node, "sampleof"),
        source_file: field(node, "sourcefile"),
        runnable: yes_no(field(node, "runnable")),
        board: field(node, "board"),
        rebuild_to: field(node, "rebuildto"),
        devices: node
            .find_children("device_ref")
            .filter_map(|d| d.attr("name"))
            .map(str::to_string)
            .collect(),
        machine_type,
    }
}

fn dump_status(value: Option<&str>) -> DumpStatus {
    match value {
        Some("nodump") => DumpStatus::Nodump,
        Some("good") | Some("verified") => DumpStatus::Good,
        _ => DumpStatus::Unknown,
    }
}

fn parse_entry(node: &DatNode) -> Option<CatalogEntry> {
    let attr = |key: &str| node.attr(key).map(str::to_string);
    match node.name.as_str() {
        "rom" => Some(CatalogEntry::Rom(Rom {
            name: attr("name").unwrap_or_default(),
            size: node
                .attr("size")
                .and_then(|s| s.parse().ok())
                .unwrap_or(-1),
            crc: attr("crc").unwrap_or_default().to_lowercase(),
            md5: attr("md5").unwrap_or_default().to_lowercase(),
            sha1: attr("sha1").unwrap_or_default().to_lowercase(),
            status: dump_status(node.attr("status").or_else(|| node.attr("flags"))),
            merge: attr("merge"),
            date: attr("date"),
            ..Rom::default()
        })),
        "disk" => Some(CatalogEntry::Disk(Disk {
            name: attr("name").unwrap_or_default(),
            md5: attr("md5").unwrap_or_default().to_lowercase(),
            sha1: attr("sha1").unwrap_or_default().to_lowercase(),
            status: dump_status(node.attr("status").or_else(|| node.attr("flags"))),
            merge: attr("merge"),
            ..Disk::default()
        })),
        "release" => Some(CatalogEntry::Release(Release {
            name: attr("name").unwrap_or_default(),
            region: attr("region"),
            language: attr("language"),
            date: attr("date"),
            default: yes_no(attr("default")),
            ..Release::default()
        })),
        "biosset" => Some(CatalogEntry::BiosSet(BiosSet {
            name: attr("name").unwrap_or_default(),
            description: attr("description"),
            default: yes_no(attr("default")),
            ..BiosSet::default()
        })),
        "sample" => Some(CatalogEntry::Sample(Sample {
            name: attr("name").unwrap_or_default(),
            ..Sample::default()
        })),
        "archive" => Some(CatalogEntry::Archive(Archive {
            name: attr("name").unwrap_or_default(),
            ..Archive::default()
        })),
        _ => None,
    }
}
