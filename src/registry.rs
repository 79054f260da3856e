//! # Field Registry
//!
//! The permitted values for the categorical form fields. Both sets are
//! closed: a value that is not listed here never reaches a record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Knit fabric qualities offered for the `fabricType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FabricType {
    #[serde(rename = "süprem")]
    Suprem,
    #[serde(rename = "likrali süprem")]
    LikraliSuprem,
    #[serde(rename = "iki iplik")]
    IkiIplik,
    #[serde(rename = "üç iplik")]
    UcIplik,
    #[serde(rename = "ottoman")]
    Ottoman,
    #[serde(rename = "modal")]
    Modal,
    #[serde(rename = "viskon")]
    Viskon,
    #[serde(rename = "selanik")]
    Selanik,
    #[serde(rename = "kaşkorse")]
    Kaskorse,
    #[serde(rename = "ribana")]
    Ribana,
    #[serde(rename = "ringel")]
    Ringel,
    #[serde(rename = "devore süprem")]
    DevoreSuprem,
}

impl FabricType {
    /// Every fabric type, in the order the form lists them.
    pub const ALL: [FabricType; 12] = [
        FabricType::Suprem,
        FabricType::LikraliSuprem,
        FabricType::IkiIplik,
        FabricType::UcIplik,
        FabricType::Ottoman,
        FabricType::Modal,
        FabricType::Viskon,
        FabricType::Selanik,
        FabricType::Kaskorse,
        FabricType::Ribana,
        FabricType::Ringel,
        FabricType::DevoreSuprem,
    ];

    /// The trade name shown on the form and in the document.
    pub fn label(&self) -> &'static str {
        match self {
            FabricType::Suprem => "süprem",
            FabricType::LikraliSuprem => "likrali süprem",
            FabricType::IkiIplik => "iki iplik",
            FabricType::UcIplik => "üç iplik",
            FabricType::Ottoman => "ottoman",
            FabricType::Modal => "modal",
            FabricType::Viskon => "viskon",
            FabricType::Selanik => "selanik",
            FabricType::Kaskorse => "kaşkorse",
            FabricType::Ribana => "ribana",
            FabricType::Ringel => "ringel",
            FabricType::DevoreSuprem => "devore süprem",
        }
    }
}

impl fmt::Display for FabricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FabricType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FabricType::ALL
            .iter()
            .copied()
            .find(|t| t.label() == s)
            .ok_or(())
    }
}

/// Garment sizes offered for the `selectedSizes` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "XXS")]
    Xxs,
    #[serde(rename = "XS")]
    Xs,
    S,
    M,
    L,
    #[serde(rename = "XL")]
    Xl,
    #[serde(rename = "XXL")]
    Xxl,
    #[serde(rename = "3XL")]
    Xxxl,
    #[serde(rename = "4XL")]
    Xxxxl,
}

impl Size {
    pub const ALL: [Size; 9] = [
        Size::Xxs,
        Size::Xs,
        Size::S,
        Size::M,
        Size::L,
        Size::Xl,
        Size::Xxl,
        Size::Xxxl,
        Size::Xxxxl,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Size::Xxs => "XXS",
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
            Size::Xxl => "XXL",
            Size::Xxxl => "3XL",
            Size::Xxxxl => "4XL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Size {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Size::ALL
            .iter()
            .copied()
            .find(|size| size.label().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
