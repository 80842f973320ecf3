/// MDU sections shown by the inspector, in display order
pub const MDU_SECTIONS: [&str; 13] = [
    "general",
    "geometry",
    "volumetables",
    "numerics",
    "physics",
    "sediment",
    "waves",
    "time",
    "restart",
    "externalforcing",
    "hydrology",
    "trachytopes",
    "output",
];
