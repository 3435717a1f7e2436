//! Item-set catalog and equip entry points on top of [`HostManager`].
use std::sync::Arc;

use wheel_content::{ContentFactory, PresetError, build_item_sets};
use wheel_core::{
    Character, EquipConfig, EquipError, EquipReport, HookError, HookRegistration, ItemSet,
    LockFlag, WheelHooks, WheelOption, WheelSets, weighted_option_ids,
};

use crate::oracle::{HostManager, PermissionRules, SessionOracleImpl};

/// Errors raised by [`Sandbox`] lookups and equips.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    #[error("no item set named '{0}'")]
    UnknownSet(String),

    #[error("no wheel option with id {0}")]
    UnknownOption(u32),

    #[error(transparent)]
    Preset(#[from] PresetError),

    #[error(transparent)]
    Equip(#[from] EquipError),

    #[error(transparent)]
    Hook(#[from] HookError),
}

/// A host plus the item sets it can equip.
pub struct Sandbox {
    host: HostManager,
    config: EquipConfig,
    custom: WheelSets,
    hooks: Arc<WheelHooks>,
}

impl Sandbox {
    pub fn new(host: HostManager, config: EquipConfig) -> Self {
        let custom = WheelSets::from_config(&config);
        Self {
            host,
            config,
            custom,
            hooks: Arc::new(WheelHooks::builtin()),
        }
    }

    /// Loads config, asset catalog and custom item sets from `factory`.
    pub fn load(factory: &ContentFactory, rules: PermissionRules) -> anyhow::Result<Self> {
        Self::load_with_session(factory, rules, SessionOracleImpl::new())
    }

    pub fn load_with_session(
        factory: &ContentFactory,
        rules: PermissionRules,
        session: SessionOracleImpl,
    ) -> anyhow::Result<Self> {
        let config = factory.load_config()?;
        let catalog = factory.load_assets()?;
        tracing::info!(
            groups = catalog.groups.len(),
            assets = catalog.assets.len(),
            dir = %factory.data_dir().display(),
            "loaded asset catalog"
        );
        let mut sandbox = Self::new(HostManager::with_session(catalog, rules, session), config);
        for set in factory.load_item_sets()? {
            let name = set.name().to_owned();
            sandbox
                .custom
                .insert(set)
                .map_err(|e| anyhow::anyhow!("Cannot store item set '{}': {}", name, e))?;
        }
        Ok(sandbox)
    }

    pub fn host(&self) -> &HostManager {
        &self.host
    }

    pub fn config(&self) -> &EquipConfig {
        &self.config
    }

    pub fn custom_sets(&self) -> &WheelSets {
        &self.custom
    }

    pub fn custom_sets_mut(&mut self) -> &mut WheelSets {
        &mut self.custom
    }

    pub fn hooks(&self) -> &WheelHooks {
        &self.hooks
    }

    /// Adds a listener to the registry used by every later equip.
    pub fn register_hook(&mut self, registration: HookRegistration) -> Result<(), SandboxError> {
        Arc::make_mut(&mut self.hooks).register(registration)?;
        Ok(())
    }

    /// Built-in sets as seen by `character`.
    pub fn builtin_sets(&self, character: &Character) -> Result<Vec<ItemSet>, SandboxError> {
        Ok(build_item_sets(character, &self.host.as_host_env())?)
    }

    /// Built-in sets followed by the stored custom sets.
    pub fn item_sets(&self, character: &Character) -> Result<Vec<ItemSet>, SandboxError> {
        let mut sets = self.builtin_sets(character)?;
        sets.extend(self.custom.iter().map(|(_, set)| set.clone()));
        Ok(sets)
    }

    /// Finds a set by display name or, for built-in sets, by preset key.
    pub fn find_set(&self, character: &Character, name: &str) -> Result<ItemSet, SandboxError> {
        let preset_title = name
            .parse::<wheel_content::PresetKind>()
            .ok()
            .map(|kind| kind.title());
        self.item_sets(character)?
            .into_iter()
            .find(|set| set.name().eq_ignore_ascii_case(name) || Some(set.name()) == preset_title)
            .ok_or_else(|| SandboxError::UnknownSet(name.to_owned()))
    }

    /// Every wheel option: built-in sets first, then custom slots.
    pub fn wheel_options(&self, character: &Character) -> Result<Vec<WheelOption>, SandboxError> {
        let mut options: Vec<WheelOption> = self
            .builtin_sets(character)?
            .iter()
            .enumerate()
            .flat_map(|(index, set)| set.to_options(index))
            .collect();
        options.extend(self.custom.to_options());
        Ok(options)
    }

    /// Wheel slots of the options enabled by default, each repeated by its weight.
    pub fn weighted_wheel(&self, character: &Character) -> Result<Vec<u32>, SandboxError> {
        let options = self.wheel_options(character)?;
        let enabled: Vec<u32> = options
            .iter()
            .filter(|option| option.default)
            .map(|option| option.id)
            .collect();
        Ok(weighted_option_ids(&options, &enabled))
    }

    /// Equips `set` on `character`, locking items with `flag`.
    pub fn equip(
        &self,
        set: &ItemSet,
        character: &mut Character,
        flag: Option<LockFlag>,
    ) -> Result<EquipReport, SandboxError> {
        let env = self.host.as_host_env();
        let report = set.equip(character, &env, flag, &self.config, &self.hooks)?;
        tracing::info!(
            set = set.name(),
            character = %character.name,
            equipped = report.equipped.len(),
            failures = report.failures.len(),
            hook_errors = report.hooks.errors().count(),
            "equipped item set"
        );
        Ok(report)
    }

    /// Equips the set and flag behind a wheel option id.
    pub fn equip_option(&self, id: u32, character: &mut Character) -> Result<EquipReport, SandboxError> {
        let option = self
            .wheel_options(character)?
            .into_iter()
            .find(|option| option.id == id)
            .ok_or(SandboxError::UnknownOption(id))?;
        let set = self.resolve_option(&option, character)?;
        self.equip(&set, character, Some(option.flag))
    }

    fn resolve_option(&self, option: &WheelOption, character: &Character) -> Result<ItemSet, SandboxError> {
        let stride = EquipConfig::MAX_FLAGS as u32;
        let set = if option.custom {
            let index = ((option.id - EquipConfig::CUSTOM_OPTION_BASE) / stride) as usize;
            self.custom.get(index).cloned()
        } else {
            let index = ((option.id - EquipConfig::BUILTIN_OPTION_BASE) / stride) as usize;
            self.builtin_sets(character)?.into_iter().nth(index)
        };
        set.ok_or(SandboxError::UnknownOption(option.id))
    }
}
