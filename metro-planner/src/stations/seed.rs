//! Built-in station data used to populate an empty store.

use crate::domain::{LineId, Station, StationId};

/// Lima Metro Line 1, north to south, with the district of each stop.
const LINE_ONE: &[(&str, &str)] = &[
    ("Bayóvar", "San Juan de Lurigancho"),
    ("Santa Rosa", "San Juan de Lurigancho"),
    ("San Martín", "San Juan de Lurigancho"),
    ("San Carlos", "San Juan de Lurigancho"),
    ("Los Postes", "San Juan de Lurigancho"),
    ("Los Jardines", "San Juan de Lurigancho"),
    ("Pirámide del Sol", "San Juan de Lurigancho"),
    ("Caja de Agua", "San Juan de Lurigancho"),
    ("Presbítero Maestro", "Lima"),
    ("El Ángel", "El Agustino"),
    ("Miguel Grau", "La Victoria"),
    ("Gamarra", "La Victoria"),
    ("Arriola", "La Victoria"),
    ("La Cultura", "San Borja"),
    ("San Borja Sur", "San Borja"),
    ("Angamos", "San Borja"),
    ("Cabitos", "Santiago de Surco"),
    ("Ayacucho", "Santiago de Surco"),
    ("Jorge Chávez", "Santiago de Surco"),
    ("Atocongo", "San Juan de Miraflores"),
    ("San Juan", "San Juan de Miraflores"),
    ("María Auxiliadora", "Villa María del Triunfo"),
    ("Villa María", "Villa María del Triunfo"),
    ("Pumacahua", "Villa María del Triunfo"),
    ("Parque Industrial", "Villa El Salvador"),
    ("Villa El Salvador", "Villa El Salvador"),
];

/// Line 1 stations in line order, with ids numbered from 1.
pub fn line_one() -> Vec<Station> {
    LINE_ONE
        .iter()
        .zip(1u32..)
        .filter_map(|(&(name, district), id)| {
            Station::new(StationId(id), name, LineId(1), district).ok()
        })
        .collect()
}
