//! Payment card brands recognised by the `creditcard` rule.

use std::fmt;
use std::str::FromStr;

use crate::error::RuleError;

/// Card brands, in the order the detection table tries them.
///
/// Each variant's [`name`](CardBrand::name) is the lowercase class a field
/// may declare (`creditcard visa`) and the value of the `cardbrand`
/// annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CardBrand {
    /// Visa - Prefix 4, lengths 13, 16, 19
    Visa,
    /// Mastercard - Prefix 51-55, 2221-2720, length 16
    Mastercard,
    /// American Express - Prefix 34, 37, length 15
    Amex,
    /// Diners Club - Prefix 300-305, 36, 38, length 14
    Diners,
    /// Discover - Prefix 6011, 65, length 16
    Discover,
    /// Elo - Brazilian network, several issuer prefixes
    Elo,
    /// Hipercard - Prefix 606282 or 3841
    Hipercard,
    /// Aura - Prefix 5078, length 19
    Aura,
    /// JCB - Prefix 2131, 1800, 35
    Jcb,
    /// Maestro - Prefix 50, 56-58, 6304, 6390, 67
    Maestro,
    /// Laser - Irish debit, prefix 6304, 6706, 6709, 6771
    Laser,
    /// Carte Blanche - Prefix 389, length 14
    Blanche,
    /// Switch - UK debit
    Switch,
    /// Korean local cards - Prefix 9, length 16
    Korean,
    /// UnionPay - Prefix 62, lengths 16-19
    Union,
    /// Solo - UK debit, prefix 6334, 6767
    Solo,
    /// InstaPayment - Prefix 637-639, length 16
    Insta,
    /// BankCard Global - Prefix 6541, 6556, length 16
    BcGlobal,
    /// RuPay - Indian network
    RuPay,
}

impl CardBrand {
    /// Every brand in detection order.
    pub const ALL: [CardBrand; 19] = [
        Self::Visa,
        Self::Mastercard,
        Self::Amex,
        Self::Diners,
        Self::Discover,
        Self::Elo,
        Self::Hipercard,
        Self::Aura,
        Self::Jcb,
        Self::Maestro,
        Self::Laser,
        Self::Blanche,
        Self::Switch,
        Self::Korean,
        Self::Union,
        Self::Solo,
        Self::Insta,
        Self::BcGlobal,
        Self::RuPay,
    ];

    /// Returns the lowercase class name used in rule tokens and annotations.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Diners => "diners",
            Self::Discover => "discover",
            Self::Elo => "elo",
            Self::Hipercard => "hipercard",
            Self::Aura => "aura",
            Self::Jcb => "jcb",
            Self::Maestro => "maestro",
            Self::Laser => "laser",
            Self::Blanche => "blanche",
            Self::Switch => "switch",
            Self::Korean => "korean",
            Self::Union => "union",
            Self::Solo => "solo",
            Self::Insta => "insta",
            Self::BcGlobal => "bcglobal",
            Self::RuPay => "rupay",
        }
    }

    /// Returns a human-readable name for the brand.
    #[inline]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Diners => "Diners Club",
            Self::Discover => "Discover",
            Self::Elo => "Elo",
            Self::Hipercard => "Hipercard",
            Self::Aura => "Aura",
            Self::Jcb => "JCB",
            Self::Maestro => "Maestro",
            Self::Laser => "Laser",
            Self::Blanche => "Carte Blanche",
            Self::Switch => "Switch",
            Self::Korean => "Korean Local",
            Self::Union => "UnionPay",
            Self::Solo => "Solo",
            Self::Insta => "InstaPayment",
            Self::BcGlobal => "BankCard Global",
            Self::RuPay => "RuPay",
        }
    }

    /// Longest card number the brand issues, in digits.
    #[inline]
    pub const fn max_digits(&self) -> usize {
        match self {
            Self::Visa
            | Self::Hipercard
            | Self::Aura
            | Self::Maestro
            | Self::Laser
            | Self::Switch
            | Self::Union
            | Self::Solo => 19,
            Self::Amex => 15,
            Self::Diners | Self::Blanche => 14,
            Self::Mastercard
            | Self::Discover
            | Self::Elo
            | Self::Jcb
            | Self::Korean
            | Self::Insta
            | Self::BcGlobal
            | Self::RuPay => 16,
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CardBrand {
    type Err = RuleError;

    /// Parses a brand class, accepting a few common aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let brand = match s.to_ascii_lowercase().as_str() {
            "visa" => Self::Visa,
            "mastercard" | "mc" => Self::Mastercard,
            "amex" => Self::Amex,
            "diners" | "dinersclub" => Self::Diners,
            "discover" => Self::Discover,
            "elo" => Self::Elo,
            "hiper" | "hipercard" => Self::Hipercard,
            "aura" => Self::Aura,
            "jcb" => Self::Jcb,
            "maestro" => Self::Maestro,
            "laser" => Self::Laser,
            "blanche" | "carteblanche" => Self::Blanche,
            "switch" => Self::Switch,
            "korean" => Self::Korean,
            "union" | "unionpay" => Self::Union,
            "solo" => Self::Solo,
            "insta" | "instapayment" => Self::Insta,
            "bcglobal" => Self::BcGlobal,
            "rupay" => Self::RuPay,
            _ => return Err(RuleError::UnknownBrand(s.to_string())),
        };
        Ok(brand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trips_through_from_str() {
        for brand in CardBrand::ALL {
            assert_eq!(brand.name().parse::<CardBrand>(), Ok(brand));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("hiper".parse::<CardBrand>(), Ok(CardBrand::Hipercard));
        assert_eq!("VISA".parse::<CardBrand>(), Ok(CardBrand::Visa));
        assert_eq!("unionpay".parse::<CardBrand>(), Ok(CardBrand::Union));
    }

    #[test]
    fn test_unknown_brand() {
        assert_eq!(
            "acme".parse::<CardBrand>(),
            Err(RuleError::UnknownBrand("acme".into()))
        );
    }

    #[test]
    fn test_max_digits() {
        assert_eq!(CardBrand::Aura.max_digits(), 19);
        assert_eq!(CardBrand::Visa.max_digits(), 19);
        assert_eq!(CardBrand::Mastercard.max_digits(), 16);
        assert_eq!(CardBrand::Amex.max_digits(), 15);
        assert_eq!(CardBrand::Diners.max_digits(), 14);
    }

    #[test]
    fn test_display() {
        assert_eq!(CardBrand::Amex.to_string(), "American Express");
        assert_eq!(CardBrand::BcGlobal.to_string(), "BankCard Global");
    }
}
