//! ASCII drawings.

use vconf_core::VehicleKind;

pub const BANNER: &str = r"
 __      __   _     _      _        _____             __ _                       _
 \ \    / /__| |__ (_)__ _| |___   / / __| ___  _ _  / _(_)__ _ _  _ _ _ __ _ _| |_ ___ _ _ _
  \ \/\/ / -_) '_ \| / _` | / -_) / / (__/ _ \| ' \| |_| / _` | || | '_/ _` |_  _/ _ \ '_| '_|
   \_/\_/\___|_.__// \__,_|_\___| /_/\___\___/|_||_|_| |_\__, |\_,_|_| \__,_| \__\___/_| |_|
                 |__/                                     |___/
";

const SEDAN: &[&str] = &[
    r"          ______--------___",
    r"         /|             / |",
    r"        / |  ___      /   |",
    r"       /__|_/   \____/    |",
    r"      |            |     _|",
    r"      |____________|____/",
    r"      |            |",
    r"      \____________/",
    r"       O        O",
];

const HATCHBACK: &[&str] = &[
    r"         __---~~~~--__",
    r"       /|             \",
    r"      / |  ___        |",
    r"     /__|_/   \____   |",
    r"    |            |   _|",
    r"    |____________|__/",
    r"    |            |",
    r"    \____________/",
    r"     O        O",
];

const SUV: &[&str] = &[
    r"         __---~~~~--__",
    r"       /|             \",
    r"      / |  ___        |",
    r"     /__|_/   \____   |",
    r"    |            |    |",
    r"    |            |    |",
    r"    |____________|____|",
    r"    |            |",
    r"    \____________/",
    r"     O        O",
];

const COUPE: &[&str] = &[
    r"    ____",
    r" __/  |_\_",
    r"|  _     _`-.",
    r"'-(_)---(_)--'",
];

const SPORT_BIKE: &[&str] = &[
    r"    ,_oo",
    r".-/c-//:::",
    r"(_)'  \\:::",
    r"      `\:::",
    r"       _\::",
    r"      /  \:",
    r"     /    \",
    r"    (    0 )",
    r"     \    /",
    r"      \__/",
];

const CRUISER: &[&str] = &[
    r"      ,_",
    r"  .-_-' `--'",
    r" /     o   \",
    r"(_)/-(_)--(_)",
];

const BIKE: &[&str] = &[
    r"    ,_oo",
    r".-/c-//:::",
    r"(_)'  \\:::",
    r"      `\:::",
];

const ELECTRIC: &[&str] = &[
    r"      ____",
    r"    /|    \",
    r"   / |     \",
    r"  /__|______\",
    r" |           |",
    r" |___________|",
    r" |_|       |_|",
    r"   ⚡       ⚡",
];

/// Drawing for a vehicle variant.
pub fn drawing(kind: &VehicleKind) -> &'static [&'static str] {
    match kind {
        VehicleKind::Car { body_type, .. } => match body_type.as_str() {
            "Sedan" => SEDAN,
            "Hatchback" => HATCHBACK,
            "SUV" => SUV,
            _ => COUPE,
        },
        VehicleKind::Motorcycle { style, .. } => match style.as_str() {
            "Sport" => SPORT_BIKE,
            "Cruiser" => CRUISER,
            _ => BIKE,
        },
        VehicleKind::Electric { .. } => ELECTRIC,
    }
}
