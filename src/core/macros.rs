/// Takes an enum definition with corresponding integer values and generates a
/// `repr(u8)` enum with a `parse` function that maps a byte back to its
/// variant. Bytes outside the table return `None` so the caller can decide
/// whether an unknown value is an error or a fallback.
macro_rules! byte_enum {(
    $(#[$meta:meta])*
    $vis:vis enum $name:ident {
        $($(#[$vmeta:meta])* $variant:ident = $val:literal,)*
    }
) => {
        $(#[$meta])*
        #[repr(u8)]
        #[derive(Clone, Copy, Debug, Eq, PartialEq)]
        $vis enum $name {
            $($(#[$vmeta])*
            $variant = $val,)*
        }

        impl $name {
            pub(crate) fn parse(byte: u8) -> Option<Self> {
                match byte {
                    $($val => Some(Self::$variant),)*
                    _ => None
                }
            }
        }
    }
}

// --- Test macros ---

#[cfg(test)]
macro_rules! make_frame {
    ($variant:path, $data:expr, $dest:ident) => {
        let frame =
            crate::id3v2::frames::next(&mut crate::core::io::BufStream::new($data)).unwrap();

        let $dest = match frame.into_body() {
            $variant(body) => body,
            other => panic!("unexpected frame body: {:?}", other),
        };
    };
}

#[cfg(test)]
macro_rules! assert_render {
    ($frame:expr, $data:expr) => {
        assert_eq!(crate::id3v2::frames::render(&$frame).unwrap(), $data)
    };
}
