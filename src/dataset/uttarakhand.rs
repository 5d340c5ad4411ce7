use super::{Category, Dataset, EdgeRecord, NodeRecord};

fn node(id: &str, label: &str, category: Category, tooltip: &str) -> NodeRecord {
	NodeRecord {
		id: id.into(),
		label: label.into(),
		category,
		tooltip: tooltip.into(),
	}
}

fn edge(source: &str, target: &str, label: &str, tooltip: &str) -> EdgeRecord {
	EdgeRecord {
		source: source.into(),
		target: target.into(),
		label: label.into(),
		tooltip: tooltip.into(),
	}
}

pub(super) fn dataset() -> Dataset {
	use Category::*;

	let nodes = vec![
		// hazards
		node("earthquake", "Earthquake", Hazard, "Seismic hazards common in Uttarakhand"),
		node("flood", "Flood", Hazard, "Flash floods and riverine floods"),
		node("landslide", "Landslide", Hazard, "Rain‑induced and seismic landslides"),
		node("cloudburst", "Cloudburst", Hazard, "Sudden, intense rainfall events"),
		// organisations
		node("usdma", "USDMA", Organisation, "Uttarakhand State Disaster Management Authority (nodal authority)"),
		node("ndma", "NDMA", Organisation, "National Disaster Management Authority (policies & guidance)"),
		node("iitroorkee", "IIT Roorkee", Organisation, "Indian Institute of Technology Roorkee (research & development)"),
		// systems and apps
		node("ueews", "UEEWS", System, "Uttarakhand State Earthquake Early Warning System"),
		node("bhudev", "Bhudev App", System, "Mobile app providing earthquake warnings"),
		node("ews_generic", "Early Warning Systems", System, "General multi‑hazard early warning systems"),
		// infrastructure
		node("sensors", "Sensors (Accelerometers)", Infrastructure, "Seismic sensors/accelerometers capturing ground motion"),
		node("sirens", "Sirens", Infrastructure, "Public siren units for alert dissemination"),
		node("server", "Central Server", Infrastructure, "Server receiving sensor data and issuing alerts"),
		node("air", "All India Radio", Infrastructure, "Broadcast channel for warnings in remote areas"),
		node("bridges", "Bridges & Infrastructure", Infrastructure, "Resilient bridges, roads and buildings"),
		// projects
		node("recovery", "Disaster Recovery Project", Project, "Uttarakhand Disaster Recovery Project (World Bank supported)"),
		node("geoplatform", "Geospatial Platform & Risk Assessment", Project, "Platform & statewide multi‑hazard risk assessment"),
		node("capacity", "Capacity Building & Training", Project, "Training & institutional strengthening (e.g. SDRF)"),
		node("risk_reduction", "Risk Reduction & Resilience", Outcome, "Reducing disaster risk and improving resilience"),
		node("community", "Communities & Residents", Community, "People living in hazard‑prone areas"),
	];

	let edges = vec![
		// governance
		edge("ndma", "usdma", "guides", "NDMA provides national guidance to USDMA"),
		edge("usdma", "ueews", "implements", "USDMA implements UEEWS for the state"),
		edge("iitroorkee", "ueews", "develops", "IIT Roorkee developed UEEWS and Bhudev"),
		edge("usdma", "recovery", "leads", "USDMA leads the Disaster Recovery Project"),
		// recovery project
		edge("recovery", "bridges", "constructs", "Project built bridges, roads & resilient infrastructure"),
		edge("recovery", "geoplatform", "establishes", "Project established geospatial platform & risk assessment"),
		edge("recovery", "capacity", "strengthens", "Project strengthened institutions & training"),
		// sensor data flow
		edge("ueews", "sensors", "uses", "UEEWS uses seismic sensors to detect quakes"),
		edge("sensors", "server", "transmits data", "Sensors send ground‑motion data to the server"),
		edge("server", "sirens", "triggers", "Server triggers public sirens when thresholds are met"),
		edge("server", "bhudev", "alerts", "Server sends alerts to Bhudev mobile app"),
		edge("bhudev", "community", "warns", "App warns communities with beep & notification"),
		edge("sirens", "community", "warns", "Sirens warn communities to seek safety"),
		edge("air", "community", "broadcasts", "All India Radio broadcasts warnings where there is no mobile connectivity"),
		// hazard monitoring
		edge("earthquake", "ueews", "monitored by", "UEEWS monitors earthquakes"),
		edge("earthquake", "bhudev", "alerts via", "Bhudev app provides earthquake alerts"),
		edge("earthquake", "sirens", "alerts via", "Sirens provide earthquake alerts"),
		edge("flood", "ews_generic", "monitored by", "Flood warnings are issued through early warning systems"),
		edge("landslide", "ews_generic", "monitored by", "Landslide warnings come from various early warning systems"),
		edge("cloudburst", "ews_generic", "monitored by", "Cloudburst alerts issued through meteorological EWS"),
		edge("ews_generic", "community", "warns", "Early warning systems alert the community"),
		// resilience
		edge("ueews", "risk_reduction", "enables", "UEEWS contributes to risk reduction and resilience"),
		edge("recovery", "risk_reduction", "enhances", "Recovery Project enhances resilience"),
		edge("geoplatform", "risk_reduction", "supports", "Risk assessments support resilience planning"),
		edge("capacity", "risk_reduction", "improves", "Capacity building improves resilience"),
		edge("risk_reduction", "community", "protects", "Risk reduction measures protect communities"),
	];

	Dataset { nodes, edges }
}
