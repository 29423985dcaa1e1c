//! Asset records and path interning
//!
//! Each distinct path string maps to exactly one record for the lifetime of
//! the host. Paths are interned verbatim: no normalisation, no case folding.

use dashmap::DashMap;
use parking_lot::RwLock;
use slotmap::{new_key_type, Key, KeyData, SlotMap};
use tracing::debug;

use nebula_engine::{HostError, HostResult};
use nebula_sdk::{AssetHandle, Color};

use crate::world::EntityTemplate;

new_key_type! {
    pub(crate) struct AssetKey;
}

fn asset_key(handle: AssetHandle) -> Option<AssetKey> {
    let raw = handle.non_sentinel()?.raw();
    let key: AssetKey = KeyData::from_ffi(raw).into();
    (key.data().as_ffi() == raw).then_some(key)
}

fn asset_handle(key: AssetKey) -> AssetHandle {
    AssetHandle::from_raw(key.data().as_ffi())
}

/// Asset categories a [`MemoryHost`](crate::MemoryHost) knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetType {
    Scene,
    Prefab,
    Texture,
    Font,
    Material,
    /// Any path whose extension is not recognised
    Memory,
}

impl AssetType {
    pub const ALL: [AssetType; 6] = [
        AssetType::Scene,
        AssetType::Prefab,
        AssetType::Texture,
        AssetType::Font,
        AssetType::Material,
        AssetType::Memory,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            AssetType::Scene => "Scene",
            AssetType::Prefab => "Prefab",
            AssetType::Texture => "Texture",
            AssetType::Font => "Font",
            AssetType::Material => "Material",
            AssetType::Memory => "MemoryAsset",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }

    /// Infer the category from a path's extension
    pub fn from_path(path: &str) -> Self {
        let extension = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "scene" => AssetType::Scene,
            "prefab" => AssetType::Prefab,
            "png" | "jpg" | "jpeg" => AssetType::Texture,
            "ttf" | "otf" => AssetType::Font,
            "nmat" | "mat" => AssetType::Material,
            _ => AssetType::Memory,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FontData {
    pub bold: AssetHandle,
    pub italic: AssetHandle,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MaterialData {
    pub colour: Color,
    pub texture: AssetHandle,
    pub tiling: f32,
}

impl Default for MaterialData {
    fn default() -> Self {
        Self {
            colour: Color::WHITE,
            texture: AssetHandle::NONE,
            tiling: 1.0,
        }
    }
}

#[derive(Default)]
pub(crate) struct PrefabData {
    pub template: Option<EntityTemplate>,
}

pub(crate) enum AssetData {
    Plain,
    Font(FontData),
    Material(MaterialData),
    Prefab(PrefabData),
}

impl AssetData {
    fn for_type(ty: AssetType) -> Self {
        match ty {
            AssetType::Font => AssetData::Font(FontData::default()),
            AssetType::Material => AssetData::Material(MaterialData::default()),
            AssetType::Prefab => AssetData::Prefab(PrefabData::default()),
            AssetType::Scene | AssetType::Texture | AssetType::Memory => AssetData::Plain,
        }
    }
}

pub(crate) struct AssetRecord {
    pub handle: AssetHandle,
    pub path: String,
    pub ty: AssetType,
    pub data: AssetData,
}

impl AssetRecord {
    fn wrong_type(&self, expected: AssetType) -> HostError {
        HostError::WrongAssetType {
            asset: self.handle,
            expected: expected.name(),
        }
    }

    pub fn expect_type(&self, expected: AssetType) -> HostResult<()> {
        if self.ty == expected {
            Ok(())
        } else {
            Err(self.wrong_type(expected))
        }
    }

    pub fn font(&self) -> HostResult<&FontData> {
        match &self.data {
            AssetData::Font(font) => Ok(font),
            _ => Err(self.wrong_type(AssetType::Font)),
        }
    }

    pub fn font_mut(&mut self) -> HostResult<&mut FontData> {
        match self.data {
            AssetData::Font(ref mut font) => Ok(font),
            _ => Err(self.wrong_type(AssetType::Font)),
        }
    }

    pub fn material(&self) -> HostResult<&MaterialData> {
        match &self.data {
            AssetData::Material(material) => Ok(material),
            _ => Err(self.wrong_type(AssetType::Material)),
        }
    }

    pub fn material_mut(&mut self) -> HostResult<&mut MaterialData> {
        match self.data {
            AssetData::Material(ref mut material) => Ok(material),
            _ => Err(self.wrong_type(AssetType::Material)),
        }
    }

    pub fn prefab(&self) -> HostResult<&PrefabData> {
        match &self.data {
            AssetData::Prefab(prefab) => Ok(prefab),
            _ => Err(self.wrong_type(AssetType::Prefab)),
        }
    }

    pub fn prefab_mut(&mut self) -> HostResult<&mut PrefabData> {
        match self.data {
            AssetData::Prefab(ref mut prefab) => Ok(prefab),
            _ => Err(self.wrong_type(AssetType::Prefab)),
        }
    }
}

/// Path index plus record storage
///
/// Lock order is index shard, then records.
#[derive(Default)]
pub(crate) struct AssetStore {
    index: DashMap<String, AssetHandle>,
    records: RwLock<SlotMap<AssetKey, AssetRecord>>,
}

impl AssetStore {
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Handle for `path`, creating its record on first use
    pub fn intern(&self, path: &str) -> HostResult<AssetHandle> {
        if path.is_empty() || path.contains('\0') {
            return Err(HostError::InvalidPath(path.to_owned()));
        }
        if let Some(handle) = self.index.get(path) {
            return Ok(*handle);
        }

        let handle = *self.index.entry(path.to_owned()).or_insert_with(|| {
            let ty = AssetType::from_path(path);
            let key = self.records.write().insert_with_key(|key| AssetRecord {
                handle: asset_handle(key),
                path: path.to_owned(),
                ty,
                data: AssetData::for_type(ty),
            });
            debug!("Interned {} asset {:?}", ty.name(), path);
            asset_handle(key)
        });
        Ok(handle)
    }

    /// Handle for an already interned path, or the sentinel
    pub fn lookup(&self, path: &str) -> AssetHandle {
        self.index
            .get(path)
            .map(|handle| *handle)
            .unwrap_or(AssetHandle::NONE)
    }

    pub fn read<T>(
        &self,
        asset: AssetHandle,
        f: impl FnOnce(&AssetRecord) -> HostResult<T>,
    ) -> HostResult<T> {
        let records = self.records.read();
        let record = asset_key(asset)
            .and_then(|key| records.get(key))
            .ok_or(HostError::InvalidAsset(asset))?;
        f(record)
    }

    pub fn write<T>(
        &self,
        asset: AssetHandle,
        f: impl FnOnce(&mut AssetRecord) -> HostResult<T>,
    ) -> HostResult<T> {
        let mut records = self.records.write();
        let record = asset_key(asset)
            .and_then(|key| records.get_mut(key))
            .ok_or(HostError::InvalidAsset(asset))?;
        f(record)
    }

    /// Fail unless `asset` is the sentinel or a live asset of type `ty`
    pub fn expect_optional(&self, asset: AssetHandle, ty: AssetType) -> HostResult<()> {
        if asset.is_none() {
            return Ok(());
        }
        self.read(asset, |record| record.expect_type(ty))
    }
}
