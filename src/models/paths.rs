// Canonical game layout. Paths are relative to the game root and use `/`.

pub const ARCHIVE_MOD_CANONICAL_PREFIX: &str = "archive/pc/mod";
pub const ARCHIVE_MOD_HERITAGE_PREFIX: &str = "archive/pc/patch";
pub const ARCHIVE_MOD_EXTENSION: &str = "archive";
pub const ARCHIVE_XL_EXTENSION: &str = "xl";

pub const CET_MOD_CANONICAL_PATH_PREFIX: &str = "bin/x64/plugins/cyber_engine_tweaks/mods";
pub const CET_MOD_CANONICAL_INIT_FILE: &str = "init.lua";

pub const REDS_MOD_CANONICAL_PATH_PREFIX: &str = "r6/scripts";
pub const REDS_MOD_CANONICAL_EXTENSION: &str = "reds";

pub const RED4EXT_MOD_CANONICAL_BASEDIR: &str = "red4ext/plugins";
pub const RED4EXT_TOPLEVEL_DIR: &str = "red4ext";
pub const RED4EXT_MOD_CANONICAL_EXTENSION: &str = "dll";

pub const TWEAK_XL_MOD_CANONICAL_PATH_PREFIX: &str = "r6/tweaks";
pub const AUDIOWARE_MOD_CANONICAL_PATH_PREFIX: &str = "r6/audioware";
pub const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

pub const REDMOD_BASEDIR: &str = "mods";
pub const REDMOD_INFO_FILENAME: &str = "info.json";
pub const REDMOD_ARCHIVES_DIRNAME: &str = "archives";
pub const REDMOD_CUSTOMSOUNDS_DIRNAME: &str = "customSounds";
pub const REDMOD_SCRIPTS_DIRNAME: &str = "scripts";
pub const REDMOD_SCRIPTS_VALID_SUBDIRS: &[&str] = &["exec", "core"];
pub const REDMOD_SCRIPT_EXTENSIONS: &[&str] = &["script", "ws"];
pub const REDMOD_TWEAKS_DIRNAME: &str = "tweaks";
pub const REDMOD_TWEAKS_VALID_SUBDIR: &str = "base";
pub const REDMOD_TWEAK_EXTENSION: &str = "tweak";
pub const REDMOD_SUBTYPE_DIRNAMES: &[&str] = &[
    REDMOD_ARCHIVES_DIRNAME,
    REDMOD_CUSTOMSOUNDS_DIRNAME,
    REDMOD_SCRIPTS_DIRNAME,
    REDMOD_TWEAKS_DIRNAME,
];
pub const REDMOD_SCRIPTS_CACHE_DIR: &str = "r6/cache/modded";
pub const REDMOD_INFO_ATTRIBUTE: &str = "V2077_mod_attr_redmod_info_array";

pub const AMM_BASEDIR_PATH: &str =
    "bin/x64/plugins/cyber_engine_tweaks/mods/AppearanceMenuMod";
pub const AMM_CONTENT_SUBDIRS: &[&str] = &[
    "Collabs/Custom Appearances",
    "Collabs/Custom Entities",
    "Collabs/Custom Props",
    "User/Decor",
    "User/Locations",
    "User/Scripts",
    "User/Themes",
];

pub const ASI_MOD_PATH: &str = "bin/x64/plugins";
pub const ASI_MOD_EXTENSION: &str = "asi";

pub const INI_MOD_PATH: &str = "engine/config/platform/pc";
pub const INI_MOD_EXTENSION: &str = "ini";
pub const RESHADE_MOD_PATH: &str = "bin/x64";
pub const RESHADE_SHADERS_DIR: &str = "reshade-shaders";

pub const CONFIG_JSON_EXTENSION: &str = "json";
pub const CONFIG_JSON_ROOTS: &[&str] = &["engine/config", "r6/config"];
/// (file name at the top of an archive, canonical location)
pub const CONFIG_JSON_KNOWN_FILES: &[(&str, &str)] = &[
    ("giweights.json", "engine/config/giweights.json"),
    ("bumpersSettings.json", "r6/config/bumpersSettings.json"),
    ("options.json", "r6/config/settings/platform/pc/options.json"),
];
pub const CONFIG_JSON_CANONICAL_FILES: &[&str] = &[
    "engine/config/giweights.json",
    "r6/config/bumpersSettings.json",
    "r6/config/settings/options.json",
    "r6/config/settings/platform/pc/options.json",
];

pub const CONFIG_XML_EXTENSION: &str = "xml";
pub const CONFIG_XML_MOD_BASEDIR: &str = "r6/config";
pub const CONFIG_XML_KNOWN_FILES: &[&str] = &[
    "inputContexts.xml",
    "inputDeadzones.xml",
    "inputUserMappings.xml",
    "uiInputActions.xml",
];
pub const INPUT_LOADER_MOD_BASEDIR: &str = "r6/input";

pub const PRESET_MOD_EXTENSION: &str = "preset";
pub const PRESET_UNLOCKER_FEMALE_DIR: &str =
    "bin/x64/plugins/cyber_engine_tweaks/mods/AppearanceChangeUnlocker/character-preset/female";
pub const PRESET_UNLOCKER_MALE_DIR: &str =
    "bin/x64/plugins/cyber_engine_tweaks/mods/AppearanceChangeUnlocker/character-preset/male";
pub const PRESET_CYBERCAT_DIR: &str = "V2077/presets/cybercat";

/// Top-level directories a correctly laid out archive may start with.
pub const KNOWN_TOPLEVEL_DIRS: &[&str] = &["archive", "bin", "engine", "mods", "r6", "red4ext"];

/// DLLs the game or its runtimes already ship. A mod placing one of these
/// where the loader picks it up would shadow the real one.
pub const RED4EXT_KNOWN_NONOVERRIDABLE_DLLS: &[&str] = &[
    "amd_ags_x64.dll",
    "bink2w64.dll",
    "clrcompression.dll",
    "clrjit.dll",
    "coreclr.dll",
    "d3dcompiler_47.dll",
    "ffx_fsr2_api_dx12_x64.dll",
    "ffx_fsr2_api_x64.dll",
    "gameservicesgog.dll",
    "gameservicessteam.dll",
    "libxess.dll",
    "mscordaccore.dll",
    "mscordbi.dll",
    "mscorrc.dll",
    "msvcp140_clr0400.dll",
    "nvlowlatencyvk.dll",
    "nvngx_dlss.dll",
    "nvngx_dlssg.dll",
    "oo2ext_7_win64.dll",
    "physx3_x64.dll",
    "physx3characterkinematic_x64.dll",
    "physx3common_x64.dll",
    "physx3cooking_x64.dll",
    "physxdevice64.dll",
    "physxfoundation_x64.dll",
    "powrprof.dll",
    "red4ext.dll",
    "sl.common.dll",
    "sl.dlss.dll",
    "sl.interposer.dll",
    "sl.reflex.dll",
    "vcruntime140_clr0400.dll",
    "version.dll",
    "winmm.dll",
];
