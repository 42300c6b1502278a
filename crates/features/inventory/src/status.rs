//! Wire enums carried by inventory objects.

use std::fmt;
use vsim_domain::reflect::{AsField, Field};

/// Declares a wire enum: the Rust variant, its protocol spelling, and the first listed
/// variant as default.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $first:ident => $first_wire:literal $(, $variant:ident => $wire:literal)* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub enum $name {
            #[default]
            $first,
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [Self] = &[Self::$first $(, Self::$variant)*];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    Self::$first => $first_wire,
                    $(Self::$variant => $wire,)*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AsField for $name {
            fn as_field(&self) -> Field<'_> {
                Field::Enum { type_name: stringify!($name), value: self.as_str() }
            }
        }
    };
}

wire_enum!(
    /// Aggregated alarm state of an entity.
    ManagedEntityStatus {
        Gray => "gray",
        Green => "green",
        Yellow => "yellow",
        Red => "red",
    }
);

wire_enum!(VirtualMachinePowerState {
    PoweredOff => "poweredOff",
    PoweredOn => "poweredOn",
    Suspended => "suspended",
});

wire_enum!(VirtualMachineConnectionState {
    Connected => "connected",
    Disconnected => "disconnected",
    Orphaned => "orphaned",
    Inaccessible => "inaccessible",
    Invalid => "invalid",
});

wire_enum!(HostSystemConnectionState {
    Connected => "connected",
    NotResponding => "notResponding",
    Disconnected => "disconnected",
});

wire_enum!(HostSystemPowerState {
    PoweredOn => "poweredOn",
    PoweredOff => "poweredOff",
    StandBy => "standBy",
    Unknown => "unknown",
});
