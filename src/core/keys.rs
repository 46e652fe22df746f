//! Fixed key vocabularies used by conditions and iteration targets.
//!
//! Card data refers to tokens, resources and citizen roles by their
//! Spanish names (`"justicia"`, `"carbon"`, `"trabajadoresEnfermos"`).
//! Each vocabulary is a closed enum so lookups are checked once at the
//! boundary and the rest of the engine works with typed keys.

use serde::{Deserialize, Serialize};

macro_rules! state_keys {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $key:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl $name {
            /// Every key, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The key as written in card data.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            /// Look up a key by its card-data name.
            #[must_use]
            pub fn parse(key: &str) -> Option<Self> {
                match key {
                    $($key => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

state_keys! {
    /// Hope token types.
    HopeKind {
        Justicia => "justicia",
        Cuidado => "cuidado",
        Motivacion => "motivacion",
    }
}

state_keys! {
    /// Discontent token types.
    DiscontentKind {
        Codicia => "codicia",
        Ira => "ira",
        Apatia => "apatia",
    }
}

state_keys! {
    /// Stockpiled resources.
    ResourceKind {
        Carbon => "carbon",
        Madera => "madera",
        Comida => "comida",
    }
}

state_keys! {
    /// Citizen roles, healthy and sick.
    CitizenKind {
        Trabajadores => "trabajadores",
        Ingenieros => "ingenieros",
        Ninos => "ninos",
        TrabajadoresEnfermos => "trabajadoresEnfermos",
        IngenierosEnfermos => "ingenierosEnfermos",
        NinosEnfermos => "ninosEnfermos",
    }
}
