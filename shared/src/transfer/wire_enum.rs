/// Declares a fieldless enum that travels as the varint32 of its
/// discriminant. Decoding a discriminant no variant owns fails with
/// [`TransferError::InvalidEnumValue`](crate::TransferError::InvalidEnumValue).
///
/// ```ignore
/// wire_enum! {
///     #[derive(Default)]
///     pub enum StashTabColor {
///         #[default]
///         White = 0,
///         Red = 1,
///     }
/// }
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u32)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $value
            ),+
        }

        impl $name {
            pub fn to_wire(self) -> u32 {
                self as u32
            }

            pub fn from_wire(value: u32) -> Option<Self> {
                match value {
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl $crate::Transfer for $name {
            fn transfer(
                &mut self,
                archive: &mut $crate::Archive<'_>,
            ) -> Result<(), $crate::TransferError> {
                let mut raw = self.to_wire();
                archive.transfer_primitive(
                    &mut raw,
                    |writer, value| $crate::write_varint32(writer, *value),
                    $crate::read_varint32,
                )?;

                if archive.is_decoding() {
                    *self = Self::from_wire(raw).ok_or($crate::TransferError::InvalidEnumValue {
                        type_name: stringify!($name),
                        value: raw,
                    })?;
                }
                Ok(())
            }
        }
    };
}
