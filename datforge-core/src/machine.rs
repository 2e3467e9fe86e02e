use serde::{Deserialize, Serialize};

/// Kind of machine a DAT declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MachineType {
    /// The DAT did not tag the machine.
    #[default]
    Unspecified,
    /// A regular game machine.
    Normal,
    /// A BIOS set other machines reference via `rom_of`.
    Bios,
    /// A device machine referenced through `devices`.
    Device,
    /// A mechanical machine (no emulated gameplay).
    Mechanical,
}

/// A named unit (game, device, or BIOS) that owns catalog entries.
///
/// `clone_of`, `rom_of`, and `sample_of` are back-references by name, never
/// owned values: a machine set may legally contain clones whose parent is
/// absent, and resolution simply returns `None` for those.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Machine {
    pub name: String,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub year: Option<String>,
    pub manufacturer: Option<String>,
    /// Name of the parent this machine is a clone of, if any.
    pub clone_of: Option<String>,
    /// Name of the machine whose ROMs this one shares, if any.
    pub rom_of: Option<String>,
    /// Name of the machine whose samples this one shares, if any.
    pub sample_of: Option<String>,
    /// Source-file tag carried over from the DAT.
    pub source_file: Option<String>,
    /// Tri-state runnable flag: `None` when the DAT doesn't say.
    pub runnable: Option<bool>,
    pub board: Option<String>,
    /// Name to rebuild this machine's set under, if different from `name`.
    pub rebuild_to: Option<String>,
    /// Ordered list of device machine names this machine requires.
    pub devices: Vec<String>,
    pub machine_type: MachineType,
}

impl Machine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Resolve the `clone_of` parent against a machine set.
    pub fn clone_parent<'a>(&self, machines: &'a [Machine]) -> Option<&'a Machine> {
        let parent = self.clone_of.as_deref()?;
        machines.iter().find(|m| m.name == parent)
    }

    /// Resolve the `rom_of` parent against a machine set.
    pub fn rom_parent<'a>(&self, machines: &'a [Machine]) -> Option<&'a Machine> {
        let parent = self.rom_of.as_deref()?;
        machines.iter().find(|m| m.name == parent)
    }

    /// Resolve the `sample_of` parent against a machine set.
    pub fn sample_parent<'a>(&self, machines: &'a [Machine]) -> Option<&'a Machine> {
        let parent = self.sample_of.as_deref()?;
        machines.iter().find(|m| m.name == parent)
    }
}
