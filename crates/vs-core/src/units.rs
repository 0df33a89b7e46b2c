// vs-core/src/units.rs

use uom::si::f64::{
    KinematicViscosity as UomKinematicViscosity, Length as UomLength, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (f64).
//
// The sizing formulas themselves work on plain magnitudes in a fixed US
// engineering convention (GPM, inches, PSI, cSt, ft/s) because their
// empirical constants belong to that convention; these types exist so the
// input boundary can accept other units and convert exactly once.
pub type Flow = UomVolumeRate;
pub type Press = UomPressure;
pub type Len = UomLength;
pub type Vel = UomVelocity;
pub type KinVisc = UomKinematicViscosity;
pub type Temp = UomThermodynamicTemperature;

#[inline]
pub fn gpm(v: f64) -> Flow {
    use uom::si::volume_rate::gallon_per_minute;
    Flow::new::<gallon_per_minute>(v)
}

#[inline]
pub fn lpm(v: f64) -> Flow {
    use uom::si::volume_rate::liter_per_minute;
    Flow::new::<liter_per_minute>(v)
}

#[inline]
pub fn m3h(v: f64) -> Flow {
    use uom::si::volume_rate::cubic_meter_per_hour;
    Flow::new::<cubic_meter_per_hour>(v)
}

#[inline]
pub fn to_gpm(q: Flow) -> f64 {
    use uom::si::volume_rate::gallon_per_minute;
    q.get::<gallon_per_minute>()
}

#[inline]
pub fn psi(v: f64) -> Press {
    use uom::si::pressure::pound_force_per_square_inch;
    Press::new::<pound_force_per_square_inch>(v)
}

#[inline]
pub fn to_psi(q: Press) -> f64 {
    use uom::si::pressure::pound_force_per_square_inch;
    q.get::<pound_force_per_square_inch>()
}

#[inline]
pub fn inches(v: f64) -> Len {
    use uom::si::length::inch;
    Len::new::<inch>(v)
}

#[inline]
pub fn to_inches(q: Len) -> f64 {
    use uom::si::length::inch;
    q.get::<inch>()
}

#[inline]
pub fn ftps(v: f64) -> Vel {
    use uom::si::velocity::foot_per_second;
    Vel::new::<foot_per_second>(v)
}

#[inline]
pub fn mps(v: f64) -> Vel {
    use uom::si::velocity::meter_per_second;
    Vel::new::<meter_per_second>(v)
}

#[inline]
pub fn cst(v: f64) -> KinVisc {
    use uom::si::kinematic_viscosity::centistokes;
    KinVisc::new::<centistokes>(v)
}

#[inline]
pub fn to_cst(q: KinVisc) -> f64 {
    use uom::si::kinematic_viscosity::centistokes;
    q.get::<centistokes>()
}

#[inline]
pub fn celsius(v: f64) -> Temp {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temp::new::<degree_celsius>(v)
}

#[inline]
pub fn to_celsius(q: Temp) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    q.get::<degree_celsius>()
}
