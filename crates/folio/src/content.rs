//! The static portfolio content.
//!
//! This is display data, not behavior: the controllers never read it
//! themselves, the embedding surface passes the relevant pieces in.

use folio_core::ProjectId;

/// A portfolio project card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project {
    /// Stable identifier used to key summary state.
    pub id: ProjectId,
    /// Display title.
    pub title: &'static str,
    /// Short category label.
    pub kind: &'static str,
    /// The original hand-written description.
    pub description: &'static str,
    /// Technology tags.
    pub tags: &'static [&'static str],
}

/// Returns the featured projects, in display order.
pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: ProjectId::new("env-monitoring"),
            title: "Monitorización Ambiental Distribuida",
            kind: "IoT",
            description: "Red de nodos ESP32 autónomos que reportan métricas \
                de calidad de aire y temperatura vía MQTT a un servidor \
                centralizado con visualización en Grafana.",
            tags: &["ESP32", "MQTT", "C++", "Grafana"],
        },
        Project {
            id: ProjectId::new("smart-parking"),
            title: "Smart Parking con Visión Artificial",
            kind: "Computer Vision",
            description: "Sistema de detección de plazas libres en tiempo \
                real utilizando cámaras, OpenCV en Raspberry Pi y una \
                interfaz web React para el usuario final.",
            tags: &["Python", "OpenCV", "React", "RPi"],
        },
        Project {
            id: ProjectId::new("home-hub"),
            title: "Hub Domótico Seguro (Offline First)",
            kind: "Security",
            description: "Controlador domótico Zigbee desplegado en \
                contenedores Docker, diseñado para funcionar sin internet \
                priorizando la privacidad de los datos del usuario.",
            tags: &["Docker", "Zigbee", "Linux", "Home Assistant"],
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_project_ids_are_unique() {
        let projects = projects();
        let ids: HashSet<_> = projects.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), projects.len());
    }
}
