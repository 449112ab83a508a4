//! The standard system: SI base and derived units, common prefixed units,
//! temperature scales and imperial/US units.

use mensura_core::{ratio, ratio_from_decimal, Ratio};

use crate::{Dimension, MetricPrefix, QuantityKind, SystemBuilder, SystemOfUnits, Unit, UnitError};

fn exact(num: i64, den: i64) -> Result<Ratio, UnitError> {
    Ok(ratio(num, den)?)
}

fn decimal(literal: &str) -> Result<Ratio, UnitError> {
    ratio_from_decimal(literal).map_err(|e| UnitError::InvalidOperand(e.to_string()))
}

// ========== Base units ==========

/// SI base unit of length
pub fn metre() -> Unit {
    Unit::base("m", Dimension::length())
}

/// SI base unit of mass
pub fn kilogram() -> Unit {
    Unit::base("kg", Dimension::mass())
}

/// SI base unit of time
pub fn second() -> Unit {
    Unit::base("s", Dimension::time())
}

/// SI base unit of electric current
pub fn ampere() -> Unit {
    Unit::base("A", Dimension::current())
}

/// SI base unit of temperature
pub fn kelvin() -> Unit {
    Unit::base("K", Dimension::temperature())
}

/// SI base unit of amount of substance
pub fn mole() -> Unit {
    Unit::base("mol", Dimension::amount())
}

/// SI base unit of luminous intensity
pub fn candela() -> Unit {
    Unit::base("cd", Dimension::luminosity())
}

// ========== Derived units ==========

/// g = kg / 1000
pub fn gram() -> Result<Unit, UnitError> {
    Ok(kilogram().scale(exact(1, 1000)?)?.named("g"))
}

/// K = °C + 273.15
pub fn celsius() -> Result<Unit, UnitError> {
    Ok(kelvin().shift(decimal("273.15")?).named("°C"))
}

/// K = °R * 5/9
pub fn rankine() -> Result<Unit, UnitError> {
    Ok(kelvin().scale(exact(5, 9)?)?.named("°R"))
}

/// °R = °F + 459.67
pub fn fahrenheit() -> Result<Unit, UnitError> {
    Ok(rankine()?.shift(decimal("459.67")?).named("°F"))
}

/// N = kg*m/s^2
pub fn newton() -> Result<Unit, UnitError> {
    Ok(kilogram().multiply(&metre())?.divide(&second().pow(2)?)?.alternate("N"))
}

/// J = N*m
pub fn joule() -> Result<Unit, UnitError> {
    Ok(newton()?.multiply(&metre())?.alternate("J"))
}

/// W = J/s
pub fn watt() -> Result<Unit, UnitError> {
    Ok(joule()?.divide(&second())?.alternate("W"))
}

/// Pa = N/m^2
pub fn pascal() -> Result<Unit, UnitError> {
    Ok(newton()?.divide(&metre().pow(2)?)?.alternate("Pa"))
}

/// Hz = 1/s
pub fn hertz() -> Result<Unit, UnitError> {
    Ok(second().inverse()?.alternate("Hz"))
}

/// C = A*s
pub fn coulomb() -> Result<Unit, UnitError> {
    Ok(ampere().multiply(&second())?.alternate("C"))
}

/// V = W/A
pub fn volt() -> Result<Unit, UnitError> {
    Ok(watt()?.divide(&ampere())?.alternate("V"))
}

/// Ω = V/A
pub fn ohm() -> Result<Unit, UnitError> {
    Ok(volt()?.divide(&ampere())?.alternate("Ω"))
}

/// Build the standard system
pub fn system() -> Result<SystemOfUnits, UnitError> {
    let builder = SystemOfUnits::builder("SI");
    let builder = register_base_units(builder);
    let builder = register_length_units(builder)?;
    let builder = register_mass_units(builder)?;
    let builder = register_time_units(builder)?;
    let builder = register_temperature_units(builder)?;
    let builder = register_derived_units(builder)?;
    let builder = register_area_volume_units(builder)?;
    builder.build()
}

fn register_base_units(builder: SystemBuilder) -> SystemBuilder {
    builder
        .with_unit_for(QuantityKind::DIMENSIONLESS, Unit::one())
        .with_unit_for(QuantityKind::LENGTH, metre())
        .with_unit_for(QuantityKind::MASS, kilogram())
        .with_unit_for(QuantityKind::TIME, second())
        .with_unit_for(QuantityKind::ELECTRIC_CURRENT, ampere())
        .with_unit_for(QuantityKind::TEMPERATURE, kelvin())
        .with_unit_for(QuantityKind::AMOUNT_OF_SUBSTANCE, mole())
        .with_unit_for(QuantityKind::LUMINOUS_INTENSITY, candela())
        .with_alias("metre", "m")
        .with_alias("meter", "m")
        .with_alias("kilogram", "kg")
        .with_alias("second", "s")
        .with_alias("ampere", "A")
        .with_alias("kelvin", "K")
        .with_alias("mole", "mol")
        .with_alias("candela", "cd")
}

fn register_length_units(builder: SystemBuilder) -> Result<SystemBuilder, UnitError> {
    let m = metre();
    Ok(builder
        // SI length units
        .with_unit(m.prefixed(MetricPrefix::Kilo))
        .with_unit(m.prefixed(MetricPrefix::Centi))
        .with_unit(m.prefixed(MetricPrefix::Milli))
        .with_unit(m.prefixed(MetricPrefix::Micro))
        .with_unit(m.prefixed(MetricPrefix::Nano))
        // Imperial/US length units
        .with_unit(m.scale(decimal("0.0254")?)?.named("in"))
        .with_unit(m.scale(decimal("0.3048")?)?.named("ft"))
        .with_unit(m.scale(decimal("0.9144")?)?.named("yd"))
        .with_unit(m.scale(decimal("1609.344")?)?.named("mi"))
        .with_unit(m.scale(exact(1852, 1)?)?.named("nmi"))
        // Aliases
        .with_alias("km", "k:m")
        .with_alias("cm", "c:m")
        .with_alias("mm", "m:m")
        .with_alias("um", "µ:m")
        .with_alias("nm", "n:m")
        .with_alias("inch", "in")
        .with_alias("foot", "ft")
        .with_alias("feet", "ft")
        .with_alias("yard", "yd")
        .with_alias("mile", "mi"))
}

fn register_mass_units(builder: SystemBuilder) -> Result<SystemBuilder, UnitError> {
    let g = gram()?;
    let lb = kilogram().scale(decimal("0.45359237")?)?.named("lb");
    let oz = lb.scale(exact(1, 16)?)?.named("oz");
    Ok(builder
        .with_unit(g.prefixed(MetricPrefix::Milli))
        .with_unit(g.prefixed(MetricPrefix::Micro))
        .with_unit(g)
        .with_unit(kilogram().scale(exact(1000, 1)?)?.named("t"))
        .with_unit(lb)
        .with_unit(oz)
        .with_alias("gram", "g")
        .with_alias("mg", "m:g")
        .with_alias("ug", "µ:g")
        .with_alias("µg", "µ:g")
        .with_alias("tonne", "t")
        .with_alias("pound", "lb")
        .with_alias("ounce", "oz"))
}

fn register_time_units(builder: SystemBuilder) -> Result<SystemBuilder, UnitError> {
    let s = second();
    let min = s.scale(exact(60, 1)?)?.named("min");
    let h = min.scale(exact(60, 1)?)?.named("h");
    let d = h.scale(exact(24, 1)?)?.named("d");
    let wk = d.scale(exact(7, 1)?)?.named("wk");
    Ok(builder
        .with_unit(s.prefixed(MetricPrefix::Milli))
        .with_unit(s.prefixed(MetricPrefix::Micro))
        .with_unit(s.prefixed(MetricPrefix::Nano))
        .with_unit(min)
        .with_unit(h)
        .with_unit(d)
        .with_unit(wk)
        .with_alias("ms", "m:s")
        .with_alias("us", "µ:s")
        .with_alias("ns", "n:s")
        .with_alias("minute", "min")
        .with_alias("hour", "h")
        .with_alias("day", "d")
        .with_alias("week", "wk"))
}

fn register_temperature_units(builder: SystemBuilder) -> Result<SystemBuilder, UnitError> {
    Ok(builder
        .with_unit(celsius()?)
        .with_unit(rankine()?)
        .with_unit(fahrenheit()?)
        .with_alias("degC", "°C")
        .with_alias("celsius", "°C")
        .with_alias("degF", "°F")
        .with_alias("fahrenheit", "°F")
        .with_alias("rankine", "°R"))
}

fn register_derived_units(builder: SystemBuilder) -> Result<SystemBuilder, UnitError> {
    Ok(builder
        .with_unit_for(QuantityKind::SPEED, metre().divide(&second())?)
        .with_unit_for(QuantityKind::ACCELERATION, metre().divide(&second().pow(2)?)?)
        .with_unit_for(QuantityKind::FORCE, newton()?)
        .with_unit_for(QuantityKind::ENERGY, joule()?)
        .with_unit_for(QuantityKind::POWER, watt()?)
        .with_unit_for(QuantityKind::PRESSURE, pascal()?)
        .with_unit_for(QuantityKind::FREQUENCY, hertz()?)
        .with_unit_for(QuantityKind::ELECTRIC_CHARGE, coulomb()?)
        .with_unit_for(QuantityKind::ELECTRIC_POTENTIAL, volt()?)
        .with_unit_for(QuantityKind::ELECTRIC_RESISTANCE, ohm()?)
        .with_alias("newton", "N")
        .with_alias("joule", "J")
        .with_alias("watt", "W")
        .with_alias("pascal", "Pa")
        .with_alias("hertz", "Hz")
        .with_alias("coulomb", "C")
        .with_alias("volt", "V")
        .with_alias("ohm", "Ω"))
}

fn register_area_volume_units(builder: SystemBuilder) -> Result<SystemBuilder, UnitError> {
    let m2 = metre().pow(2)?;
    let m3 = metre().pow(3)?;
    Ok(builder
        .with_unit_for(QuantityKind::AREA, m2.clone())
        .with_unit_for(QuantityKind::VOLUME, m3.clone())
        .with_unit(m2.scale(exact(10_000, 1)?)?.named("ha"))
        .with_unit(m3.scale(exact(1, 1000)?)?.named("L"))
        .with_alias("m2", "m^2")
        .with_alias("m3", "m^3")
        .with_alias("hectare", "ha")
        .with_alias("litre", "L")
        .with_alias("liter", "L"))
}
