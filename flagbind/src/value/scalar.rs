//! Scalar codecs for booleans, numbers and text.

use std::path::PathBuf;

use super::{Kind, Scalar, ValueError};

impl Scalar for bool {
    const LABEL: &'static str = "bool";
    const EMPTY_IS_VALUE: bool = true;

    fn kind() -> Kind {
        Kind::Bool
    }

    fn parse_scalar(raw: &str) -> Result<Option<Self>, ValueError> {
        match raw {
            "" | "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(Some(true)),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(Some(false)),
            _ => Err(ValueError::InvalidBool {
                value: raw.to_owned(),
            }),
        }
    }

    fn format_scalar(&self) -> String {
        self.to_string()
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

macro_rules! integer_scalar {
    ($kind:ident => $($ty:ty: $label:literal),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const LABEL: &'static str = $label;

                fn kind() -> Kind {
                    Kind::$kind
                }

                fn parse_scalar(raw: &str) -> Result<Option<Self>, ValueError> {
                    raw.parse::<$ty>()
                        .map(Some)
                        .map_err(|err| ValueError::InvalidNumber {
                            value: raw.to_owned(),
                            reason: err.to_string(),
                        })
                }

                fn format_scalar(&self) -> String {
                    self.to_string()
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

integer_scalar!(SignedInt =>
    i8: "int8",
    i16: "int16",
    i32: "int32",
    i64: "int64",
    isize: "int",
);

integer_scalar!(UnsignedInt =>
    u8: "uint8",
    u16: "uint16",
    u32: "uint32",
    u64: "uint64",
    usize: "uint",
);

macro_rules! float_scalar {
    ($($ty:ty: $label:literal),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const LABEL: &'static str = $label;

                fn kind() -> Kind {
                    Kind::Float
                }

                fn parse_scalar(raw: &str) -> Result<Option<Self>, ValueError> {
                    raw.parse::<$ty>()
                        .map(Some)
                        .map_err(|err| ValueError::InvalidNumber {
                            value: raw.to_owned(),
                            reason: err.to_string(),
                        })
                }

                // Fixed 19 fractional digits so the text parses back exactly.
                fn format_scalar(&self) -> String {
                    format!("{self:.19}")
                }

                #[expect(clippy::float_cmp, reason = "zero test is exact by definition")]
                fn is_zero(&self) -> bool {
                    *self == 0.0
                }
            }
        )*
    };
}

float_scalar!(f32: "float32", f64: "float64");

impl Scalar for String {
    const LABEL: &'static str = "string";

    fn kind() -> Kind {
        Kind::String
    }

    fn parse_scalar(raw: &str) -> Result<Option<Self>, ValueError> {
        Ok(Some(raw.to_owned()))
    }

    fn format_scalar(&self) -> String {
        self.clone()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Scalar for PathBuf {
    const LABEL: &'static str = "path";

    fn kind() -> Kind {
        Kind::String
    }

    fn parse_scalar(raw: &str) -> Result<Option<Self>, ValueError> {
        Ok(Some(Self::from(raw)))
    }

    fn format_scalar(&self) -> String {
        self.to_string_lossy().into_owned()
    }

    fn is_zero(&self) -> bool {
        self.as_os_str().is_empty()
    }
}
