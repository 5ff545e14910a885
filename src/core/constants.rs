// Storage keys
pub const RECORDS_STORAGE_KEY: &str = "monsterTrackerData";
pub const MARKERS_STORAGE_KEY: &str = "tombstonePositions";

// Data directory
pub const DATA_DIR_NAME: &str = ".bosswatch";
pub const DATA_DIR_ENV: &str = "BOSSWATCH_HOME";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "bosswatch.log";

// Countdown
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 250;
pub const MAX_TICK_INTERVAL_MS: u64 = 1000;
pub const RESPAWNED_LABEL: &str = "Respawned";

// Marker defaults (pixels)
pub const DEFAULT_MARKER_SIZE_PX: f64 = 24.0;
pub const DEFAULT_MAP_SIZE_PX: f64 = 512.0;
pub const DEFAULT_MARKER_PERCENT: f64 = 50.0;

// Boss catalog: (name, min respawn minutes, max respawn minutes, map image)
pub const DEFAULT_BOSSES: [(&str, u32, u32, &str); 9] = [
    ("Golden Thief Bug", 60, 70, "map-gtb.png"),
    ("Tao Gunka", 300, 310, "map-tao-gunka.png"),
    ("Memory of Thanatos", 120, 120, "map-thana.png"),
    ("Gloom Under Night", 300, 310, "map-gloom.png"),
    ("Fallen Bishop Hibram", 120, 130, "map-hibram.png"),
    ("Ifrit", 660, 670, "map-ifrit.png"),
    ("Valkyrie Randgris", 480, 490, "map-valk.png"),
    ("Berzebub", 720, 730, "map-beez.png"),
    ("LHZ3", 180, 210, "map-lhz3.png"),
];
