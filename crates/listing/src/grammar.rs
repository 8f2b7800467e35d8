//! Line grammar for `usbip` listings
//!
//! Each function classifies a single line and returns its captures, or
//! `None` when the line is not of that kind. Structured tokens (hex ids,
//! class codes, markers) are nom combinators; free-text fields are whatever
//! sits between them.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_till1, take_while_m_n},
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map_res, recognize, rest},
    sequence::{delimited, pair, preceded, separated_pair, tuple},
};

use crate::types::DeviceHeader;

const URL_MARKER: &str = "-> usbip://";

type ParseError<'a> = nom::error::Error<&'a str>;

fn hex4(input: &str) -> IResult<&str, &str> {
    take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit())(input)
}

fn hex2(input: &str) -> IResult<&str, &str> {
    take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit())(input)
}

fn dec3(input: &str) -> IResult<&str, &str> {
    take_while_m_n(3, 3, |c: char| c.is_ascii_digit())(input)
}

/// `(vvvv:pppp)`
fn id_pair(input: &str) -> IResult<&str, (&str, &str)> {
    delimited(char('('), separated_pair(hex4, char(':'), hex4), char(')'))(input)
}

/// `(cc/ss/pp)`, returns the inner `cc/ss/pp`
fn class_code(input: &str) -> IResult<&str, &str> {
    delimited(
        char('('),
        recognize(tuple((hex2, char('/'), hex2, char('/'), hex2))),
        char(')'),
    )(input)
}

/// Indented `:` that opens every export continuation line
fn continuation_marker(input: &str) -> IResult<&str, ()> {
    let (input, _) = tuple((space1, char(':'), space1))(input)?;
    Ok((input, ()))
}

/// Indented `<bus_id>: ` that opens an export device header
fn bus_id_prefix(input: &str) -> IResult<&str, &str> {
    let (input, (_, bus_id, _, _)) = tuple((
        space1,
        take_till1(|c: char| c == ':' || c.is_whitespace()),
        char(':'),
        space1,
    ))(input)?;
    Ok((input, bus_id))
}

/// Splits `line` at its last `(` and parses the tail with `parser`, which
/// must consume it entirely. Returns the text before the token.
fn split_trailing<'a, O>(
    line: &'a str,
    parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> Option<(&'a str, O)> {
    let line = line.trim_end();
    let start = line.rfind('(')?;
    let (_, value) = all_consuming(parser)(&line[start..]).ok()?;
    Some((&line[..start], value))
}

/// `<vendor> : <product> `; the product may be empty
fn vendor_product(fields: &str) -> Option<(&str, &str)> {
    let (vendor, product) = fields.split_once(" :")?;
    let vendor = vendor.trim();
    if vendor.is_empty() {
        return None;
    }
    Some((vendor, product.trim()))
}

/// `   1-1: Logitech, Inc. : Optical Mouse (046d:c077)`
pub(crate) fn device_header(line: &str) -> Option<DeviceHeader<'_>> {
    let (body, (vendor_id, product_id)) = split_trailing(line, id_pair)?;
    let (fields, bus_id) = bus_id_prefix(body).ok()?;
    let (vendor, product) = vendor_product(fields)?;
    Some(DeviceHeader {
        bus_id,
        vendor,
        product,
        vendor_id,
        product_id,
    })
}

/// `      : /sys/devices/pci0000:00/0000:00:14.0/usb1/1-1`
pub(crate) fn path_line(line: &str) -> Option<&str> {
    let (path, _) = continuation_marker(line).ok()?;
    let path = path.trim_end();
    path.starts_with('/').then_some(path)
}

/// `      : (Human Interface Device) (03/01/02)`, returns `(name, code)`
pub(crate) fn class_line(line: &str) -> Option<(&str, &str)> {
    let (body, _) = continuation_marker(line).ok()?;
    let (name, code) = split_trailing(body, class_code)?;
    let name = name.trim().strip_prefix('(')?.strip_suffix(')')?;
    if name.is_empty() {
        return None;
    }
    Some((name, code))
}

/// `      :  0 - Boot Interface Subclass (03/01/02)`, returns `(index, description, code)`
pub(crate) fn interface_line(line: &str) -> Option<(u32, &str, &str)> {
    let (body, (_, index, _, _, _)) = tuple((
        continuation_marker,
        map_res(digit1, |digits: &str| digits.parse::<u32>()),
        space0,
        char('-'),
        space0,
    ))(line)
    .ok()?;
    let (description, code) = split_trailing(body, class_code)?;
    Some((index, description.trim(), code))
}

/// `Port 00: device in use at High Speed(480Mbps)`, returns `(digits, speed)`
///
/// `usbip port` prints `<Port in Use>` where older builds printed
/// `device in use`; both forms are accepted.
pub(crate) fn port_header(line: &str) -> Option<(&str, &str)> {
    let (_, (_, _, digits, _, _, speed)) = tuple((
        space0::<_, ParseError<'_>>,
        tag("Port "),
        digit1,
        alt((tag(": device in use at"), tag(": <Port in Use> at"))),
        space0,
        rest,
    ))(line)
    .ok()?;
    Some((digits, speed.trim_end()))
}

/// `       SanDisk Corp. : Cruzer Blade (0781:5567)`, returns
/// `(vendor, product, vendor_id, product_id)`
pub(crate) fn imported_vendor_line(line: &str) -> Option<(&str, &str, &str, &str)> {
    let (body, (vendor_id, product_id)) = split_trailing(line, id_pair)?;
    let (fields, _) = space1::<_, ParseError<'_>>(body).ok()?;
    let (vendor, product) = vendor_product(fields)?;
    Some((vendor, product, vendor_id, product_id))
}

/// `       1-1 -> usbip://10.0.0.5:3240/1-1`, returns the part after `usbip://`
///
/// The local bus id before the arrow is optional.
pub(crate) fn remote_url_line(line: &str) -> Option<&str> {
    let (remainder, _) = preceded(
        space1::<_, ParseError<'_>>,
        alt((
            tag(URL_MARKER),
            preceded(pair(take_till1(|c: char| c.is_whitespace()), space1), tag(URL_MARKER)),
        )),
    )(line.trim_end())
    .ok()?;
    (!remainder.is_empty()).then_some(remainder)
}

/// `           -> remote bus/dev 002/003`, returns `(bus, dev)`
pub(crate) fn remote_bus_dev_line(line: &str) -> Option<(&str, &str)> {
    let (_, (_, _, bus, _, dev)) = all_consuming(tuple((
        space1::<_, ParseError<'_>>,
        tag("-> remote bus/dev "),
        dec3,
        char('/'),
        dec3,
    )))(line.trim_end())
    .ok()?;
    Some((bus, dev))
}
