// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! [XML Schema Datatypes](http://www.w3.org/2001/XMLSchema)
//! vocabulary.

use crate::named_node;

pub const NS_BASE: &str = "http://www.w3.org/2001/XMLSchema#";
pub const NS_PREFERRED_PREFIX: &str = "xsd";

named_node!(STRING, NS_BASE, "string", "Character strings.");
named_node!(
    NORMALIZED_STRING,
    NS_BASE,
    "normalizedString",
    "Whitespace-replaced strings."
);
named_node!(TOKEN, NS_BASE, "token", "Tokenized strings.");
named_node!(LANGUAGE, NS_BASE, "language", "Language tags per BCP 47.");
named_node!(ANY_URI, NS_BASE, "anyURI", "Absolute or relative URIs and IRIs.");
named_node!(BOOLEAN, NS_BASE, "boolean", "true, false");
named_node!(DECIMAL, NS_BASE, "decimal", "Arbitrary-precision decimal numbers.");
named_node!(
    DOUBLE,
    NS_BASE,
    "double",
    "64-bit floating point numbers incl. ±Inf, ±0, NaN."
);
named_node!(
    FLOAT,
    NS_BASE,
    "float",
    "32-bit floating point numbers incl. ±Inf, ±0, NaN."
);
named_node!(INTEGER, NS_BASE, "integer", "Arbitrary-size integer numbers.");
named_node!(LONG, NS_BASE, "long", "-9223372036854775808…+9223372036854775807 (64 bit).");
named_node!(INT, NS_BASE, "int", "-2147483648…+2147483647 (32 bit).");
named_node!(SHORT, NS_BASE, "short", "-32768…+32767 (16 bit).");
named_node!(BYTE, NS_BASE, "byte", "-128…+127 (8 bit).");
named_node!(
    NON_NEGATIVE_INTEGER,
    NS_BASE,
    "nonNegativeInteger",
    "Integer numbers ≥0."
);
named_node!(
    POSITIVE_INTEGER,
    NS_BASE,
    "positiveInteger",
    "Integer numbers >0."
);
named_node!(
    NON_POSITIVE_INTEGER,
    NS_BASE,
    "nonPositiveInteger",
    "Integer numbers ≤0."
);
named_node!(
    NEGATIVE_INTEGER,
    NS_BASE,
    "negativeInteger",
    "Integer numbers <0."
);
named_node!(UNSIGNED_LONG, NS_BASE, "unsignedLong", "0…18446744073709551615 (64 bit).");
named_node!(UNSIGNED_INT, NS_BASE, "unsignedInt", "0…4294967295 (32 bit).");
named_node!(UNSIGNED_SHORT, NS_BASE, "unsignedShort", "0…65535 (16 bit).");
named_node!(UNSIGNED_BYTE, NS_BASE, "unsignedByte", "0…255 (8 bit).");
named_node!(DATE, NS_BASE, "date", "Dates (yyyy-mm-dd) with or without timezone.");
named_node!(
    DATE_TIME,
    NS_BASE,
    "dateTime",
    "Date and time with or without timezone."
);
