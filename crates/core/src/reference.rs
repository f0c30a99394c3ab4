//! Predefined reference data shipped with the engine.
//!
//! Seven GPU profiles, eighteen grid regions (2023 intensities) and twenty
//! benchmarked model profiles. The database seeder inserts these once; the
//! in-memory catalog built by [`predefined_catalog`] is what tests run
//! against.

use crate::catalog::InMemoryCatalog;
use crate::profile::{GpuProfile, GridProfile, ModelCategory, ModelProfile};

// ---------------------------------------------------------------------------
// Seed tables
// ---------------------------------------------------------------------------

struct GpuSeed {
    id: &'static str,
    name: &'static str,
    tdp_watts: u32,
    typical_utilization: f64,
    memory_gb: u32,
    flops_teraflops: u32,
    embodied_carbon_kg_co2e: f64,
    expected_lifespan_hours: u32,
    water_cooling_liters_per_hour: f64,
}

struct GridSeed {
    region_id: &'static str,
    provider: &'static str,
    location: &'static str,
    gco2e_per_kwh: f64,
    source: &'static str,
    renewable_percentage: u8,
}

struct ModelSeed {
    slug: &'static str,
    display_name: &'static str,
    family: &'static str,
    category: ModelCategory,
    parameters_billion: f64,
    energy_per_million_tokens_kwh: f64,
    default_gpu: &'static str,
    gpu_count_inference: u32,
    tokens_per_second_per_gpu: u32,
    quality_score: u8,
    training_energy_mwh: f64,
    training_co2e_tons: f64,
}

/// Year all bundled grid intensities refer to.
const GRID_DATA_YEAR: i32 = 2023;

const GPUS: &[GpuSeed] = &[
    GpuSeed {
        id: "nvidia-h100",
        name: "NVIDIA H100 SXM5",
        tdp_watts: 700,
        typical_utilization: 0.65,
        memory_gb: 80,
        flops_teraflops: 989,
        embodied_carbon_kg_co2e: 150.0,
        expected_lifespan_hours: 35_000,
        water_cooling_liters_per_hour: 2.8,
    },
    GpuSeed {
        id: "nvidia-a100-80gb",
        name: "NVIDIA A100 80GB SXM",
        tdp_watts: 400,
        typical_utilization: 0.60,
        memory_gb: 80,
        flops_teraflops: 312,
        embodied_carbon_kg_co2e: 130.0,
        expected_lifespan_hours: 35_000,
        water_cooling_liters_per_hour: 1.8,
    },
    GpuSeed {
        id: "nvidia-a100-40gb",
        name: "NVIDIA A100 40GB",
        tdp_watts: 400,
        typical_utilization: 0.55,
        memory_gb: 40,
        flops_teraflops: 312,
        embodied_carbon_kg_co2e: 120.0,
        expected_lifespan_hours: 35_000,
        water_cooling_liters_per_hour: 1.7,
    },
    GpuSeed {
        id: "nvidia-v100",
        name: "NVIDIA V100 32GB",
        tdp_watts: 300,
        typical_utilization: 0.50,
        memory_gb: 32,
        flops_teraflops: 125,
        embodied_carbon_kg_co2e: 100.0,
        expected_lifespan_hours: 35_000,
        water_cooling_liters_per_hour: 1.2,
    },
    GpuSeed {
        id: "nvidia-t4",
        name: "NVIDIA T4",
        tdp_watts: 70,
        typical_utilization: 0.50,
        memory_gb: 16,
        flops_teraflops: 65,
        embodied_carbon_kg_co2e: 50.0,
        expected_lifespan_hours: 35_000,
        water_cooling_liters_per_hour: 0.4,
    },
    GpuSeed {
        id: "nvidia-a10g",
        name: "NVIDIA A10G",
        tdp_watts: 150,
        typical_utilization: 0.55,
        memory_gb: 24,
        flops_teraflops: 125,
        embodied_carbon_kg_co2e: 70.0,
        expected_lifespan_hours: 35_000,
        water_cooling_liters_per_hour: 0.7,
    },
    GpuSeed {
        id: "cpu-only",
        name: "CPU Only (Intel Xeon)",
        tdp_watts: 250,
        typical_utilization: 0.40,
        memory_gb: 0,
        flops_teraflops: 2,
        embodied_carbon_kg_co2e: 40.0,
        expected_lifespan_hours: 50_000,
        water_cooling_liters_per_hour: 0.5,
    },
];

const GRIDS: &[GridSeed] = &[
    // Americas
    GridSeed {
        region_id: "ca-central-1",
        provider: "aws",
        location: "Montreal, Canada",
        gco2e_per_kwh: 14.0,
        source: "Environment Canada NIR 2023 (Quebec grid)",
        renewable_percentage: 95,
    },
    GridSeed {
        region_id: "us-west-2",
        provider: "aws",
        location: "Oregon, USA",
        gco2e_per_kwh: 78.0,
        source: "EIA eGRID 2023 (NWPP)",
        renewable_percentage: 68,
    },
    GridSeed {
        region_id: "us-east-1",
        provider: "aws",
        location: "Virginia, USA",
        gco2e_per_kwh: 338.0,
        source: "EIA eGRID 2023 (SERC Virginia)",
        renewable_percentage: 22,
    },
    GridSeed {
        region_id: "us-central1",
        provider: "gcp",
        location: "Iowa, USA",
        gco2e_per_kwh: 410.0,
        source: "EIA eGRID 2023 (MROE)",
        renewable_percentage: 42,
    },
    GridSeed {
        region_id: "sa-east-1",
        provider: "aws",
        location: "São Paulo, Brazil",
        gco2e_per_kwh: 61.0,
        source: "MCTI Brazil National Inventory 2023",
        renewable_percentage: 83,
    },
    // Europe
    GridSeed {
        region_id: "eu-north-1",
        provider: "aws",
        location: "Stockholm, Sweden",
        gco2e_per_kwh: 9.0,
        source: "Swedish Energy Agency 2023",
        renewable_percentage: 98,
    },
    GridSeed {
        region_id: "eu-west-3",
        provider: "aws",
        location: "Paris, France",
        gco2e_per_kwh: 56.0,
        source: "RTE France Bilan Electrique 2023",
        renewable_percentage: 92,
    },
    GridSeed {
        region_id: "eu-west-1",
        provider: "aws",
        location: "Ireland",
        gco2e_per_kwh: 296.0,
        source: "EEA 2023",
        renewable_percentage: 40,
    },
    GridSeed {
        region_id: "europe-west4",
        provider: "gcp",
        location: "Netherlands",
        gco2e_per_kwh: 328.0,
        source: "CBS Netherlands 2023",
        renewable_percentage: 33,
    },
    GridSeed {
        region_id: "eu-central-1",
        provider: "aws",
        location: "Frankfurt, Germany",
        gco2e_per_kwh: 350.0,
        source: "UBA Germany 2023",
        renewable_percentage: 46,
    },
    // Middle East & Africa
    GridSeed {
        region_id: "me-south-1",
        provider: "aws",
        location: "Bahrain",
        gco2e_per_kwh: 532.0,
        source: "IEA World Energy Outlook 2023 (Bahrain)",
        renewable_percentage: 5,
    },
    GridSeed {
        region_id: "af-south-1",
        provider: "aws",
        location: "Cape Town, South Africa",
        gco2e_per_kwh: 928.0,
        source: "Eskom Integrated Report 2023",
        renewable_percentage: 7,
    },
    // Asia-Pacific
    GridSeed {
        region_id: "ap-south-1",
        provider: "aws",
        location: "Mumbai, India",
        gco2e_per_kwh: 708.0,
        source: "CEA India CO2 Baseline Database v19 (2023)",
        renewable_percentage: 12,
    },
    GridSeed {
        region_id: "ap-south-2",
        provider: "aws",
        location: "Hyderabad, India",
        gco2e_per_kwh: 708.0,
        source: "CEA India CO2 Baseline Database v19 (2023)",
        renewable_percentage: 12,
    },
    GridSeed {
        region_id: "ap-southeast-1",
        provider: "aws",
        location: "Singapore",
        gco2e_per_kwh: 408.0,
        source: "EMA Singapore 2023",
        renewable_percentage: 3,
    },
    GridSeed {
        region_id: "ap-northeast-2",
        provider: "aws",
        location: "Seoul, South Korea",
        gco2e_per_kwh: 415.0,
        source: "KEPCO Sustainability Report 2023",
        renewable_percentage: 9,
    },
    GridSeed {
        region_id: "ap-northeast-1",
        provider: "aws",
        location: "Tokyo, Japan",
        gco2e_per_kwh: 462.0,
        source: "METI Japan 2023",
        renewable_percentage: 22,
    },
    GridSeed {
        region_id: "ap-southeast-2",
        provider: "aws",
        location: "Sydney, Australia",
        gco2e_per_kwh: 660.0,
        source: "Australian Government DISER 2023",
        renewable_percentage: 32,
    },
];

const MODELS: &[ModelSeed] = &[
    ModelSeed {
        slug: "gpt4",
        display_name: "GPT-4 Class (≈1.8T params)",
        family: "gpt-4-class",
        category: ModelCategory::FrontierLlm,
        parameters_billion: 1800.0,
        energy_per_million_tokens_kwh: 4.2,
        default_gpu: "nvidia-a100-80gb",
        gpu_count_inference: 8,
        tokens_per_second_per_gpu: 40,
        quality_score: 95,
        training_energy_mwh: 62_000.0,
        training_co2e_tons: 21_000.0,
    },
    ModelSeed {
        slug: "gpt35",
        display_name: "GPT-3.5 Class (≈175B params)",
        family: "gpt-3.5-class",
        category: ModelCategory::MidSizeLlm,
        parameters_billion: 175.0,
        energy_per_million_tokens_kwh: 0.45,
        default_gpu: "nvidia-a100-40gb",
        gpu_count_inference: 2,
        tokens_per_second_per_gpu: 120,
        quality_score: 78,
        training_energy_mwh: 1287.0,
        training_co2e_tons: 552.0,
    },
    ModelSeed {
        slug: "claude3-opus",
        display_name: "Claude 3 Opus Class",
        family: "claude-3-opus",
        category: ModelCategory::FrontierLlm,
        parameters_billion: 500.0,
        energy_per_million_tokens_kwh: 2.8,
        default_gpu: "nvidia-a100-80gb",
        gpu_count_inference: 4,
        tokens_per_second_per_gpu: 50,
        quality_score: 93,
        training_energy_mwh: 30_000.0,
        training_co2e_tons: 10_200.0,
    },
    ModelSeed {
        slug: "claude3-sonnet",
        display_name: "Claude 3 Sonnet Class",
        family: "claude-3-sonnet",
        category: ModelCategory::MidSizeLlm,
        parameters_billion: 150.0,
        energy_per_million_tokens_kwh: 0.55,
        default_gpu: "nvidia-a100-40gb",
        gpu_count_inference: 2,
        tokens_per_second_per_gpu: 100,
        quality_score: 85,
        training_energy_mwh: 8000.0,
        training_co2e_tons: 2720.0,
    },
    ModelSeed {
        slug: "claude3-haiku",
        display_name: "Claude 3 Haiku Class",
        family: "claude-3-haiku",
        category: ModelCategory::SmallEdge,
        parameters_billion: 30.0,
        energy_per_million_tokens_kwh: 0.08,
        default_gpu: "nvidia-a10g",
        gpu_count_inference: 1,
        tokens_per_second_per_gpu: 300,
        quality_score: 72,
        training_energy_mwh: 1500.0,
        training_co2e_tons: 510.0,
    },
    ModelSeed {
        slug: "llama70b",
        display_name: "Llama 3 70B",
        family: "llama-70b",
        category: ModelCategory::MidSizeLlm,
        parameters_billion: 70.0,
        energy_per_million_tokens_kwh: 0.85,
        default_gpu: "nvidia-a100-80gb",
        gpu_count_inference: 2,
        tokens_per_second_per_gpu: 80,
        quality_score: 80,
        training_energy_mwh: 6500.0,
        training_co2e_tons: 2210.0,
    },
    ModelSeed {
        slug: "llama13b",
        display_name: "Llama 2 13B",
        family: "llama-13b",
        category: ModelCategory::SmallEdge,
        parameters_billion: 13.0,
        energy_per_million_tokens_kwh: 0.15,
        default_gpu: "nvidia-a10g",
        gpu_count_inference: 1,
        tokens_per_second_per_gpu: 150,
        quality_score: 62,
        training_energy_mwh: 1200.0,
        training_co2e_tons: 408.0,
    },
    ModelSeed {
        slug: "llama7b",
        display_name: "Llama 2 7B",
        family: "llama-7b",
        category: ModelCategory::SmallEdge,
        parameters_billion: 7.0,
        energy_per_million_tokens_kwh: 0.05,
        default_gpu: "nvidia-t4",
        gpu_count_inference: 1,
        tokens_per_second_per_gpu: 200,
        quality_score: 55,
        training_energy_mwh: 500.0,
        training_co2e_tons: 170.0,
    },
    ModelSeed {
        slug: "mistral7b",
        display_name: "Mistral 7B",
        family: "mistral-7b",
        category: ModelCategory::SmallEdge,
        parameters_billion: 7.0,
        energy_per_million_tokens_kwh: 0.04,
        default_gpu: "nvidia-t4",
        gpu_count_inference: 1,
        tokens_per_second_per_gpu: 220,
        quality_score: 60,
        training_energy_mwh: 400.0,
        training_co2e_tons: 136.0,
    },
    ModelSeed {
        slug: "mixtral8x7b",
        display_name: "Mixtral 8x7B (MoE)",
        family: "mixtral-8x7b",
        category: ModelCategory::MidSizeLlm,
        parameters_billion: 47.0,
        energy_per_million_tokens_kwh: 0.25,
        default_gpu: "nvidia-a100-40gb",
        gpu_count_inference: 1,
        tokens_per_second_per_gpu: 110,
        quality_score: 74,
        training_energy_mwh: 2000.0,
        training_co2e_tons: 680.0,
    },
    ModelSeed {
        slug: "gemini-pro",
        display_name: "Gemini Pro Class",
        family: "gemini-pro",
        category: ModelCategory::FrontierLlm,
        parameters_billion: 300.0,
        energy_per_million_tokens_kwh: 1.8,
        default_gpu: "nvidia-h100",
        gpu_count_inference: 4,
        tokens_per_second_per_gpu: 70,
        quality_score: 90,
        training_energy_mwh: 25_000.0,
        training_co2e_tons: 8500.0,
    },
    ModelSeed {
        slug: "grok-2",
        display_name: "Grok-2 (xAI, ≈314B params)",
        family: "grok-2",
        category: ModelCategory::FrontierLlm,
        parameters_billion: 314.0,
        energy_per_million_tokens_kwh: 2.4,
        default_gpu: "nvidia-h100",
        gpu_count_inference: 4,
        tokens_per_second_per_gpu: 55,
        quality_score: 88,
        training_energy_mwh: 35_000.0,
        training_co2e_tons: 11_900.0,
    },
    ModelSeed {
        slug: "deepseek-v3",
        display_name: "DeepSeek-V3 (MoE, 671B total / 37B active)",
        family: "deepseek-v3",
        category: ModelCategory::FrontierLlm,
        parameters_billion: 671.0,
        energy_per_million_tokens_kwh: 0.95,
        default_gpu: "nvidia-h100",
        gpu_count_inference: 4,
        tokens_per_second_per_gpu: 90,
        quality_score: 86,
        training_energy_mwh: 5500.0,
        training_co2e_tons: 1870.0,
    },
    ModelSeed {
        slug: "gemini-flash-2",
        display_name: "Gemini 2.0 Flash (Google, distilled)",
        family: "gemini-flash",
        category: ModelCategory::SmallEdge,
        parameters_billion: 9.0,
        energy_per_million_tokens_kwh: 0.10,
        default_gpu: "nvidia-t4",
        gpu_count_inference: 1,
        tokens_per_second_per_gpu: 180,
        quality_score: 74,
        training_energy_mwh: 800.0,
        training_co2e_tons: 272.0,
    },
    ModelSeed {
        slug: "llama-3.1-405b",
        display_name: "Llama 3.1 405B (Meta, open-weight)",
        family: "llama-3.1-405b",
        category: ModelCategory::FrontierLlm,
        parameters_billion: 405.0,
        energy_per_million_tokens_kwh: 3.6,
        default_gpu: "nvidia-h100",
        gpu_count_inference: 8,
        tokens_per_second_per_gpu: 30,
        quality_score: 92,
        training_energy_mwh: 39_000.0,
        training_co2e_tons: 13_260.0,
    },
    ModelSeed {
        slug: "qwen-72b",
        display_name: "Qwen 2.5 72B (Alibaba Cloud)",
        family: "qwen-72b",
        category: ModelCategory::MidSizeLlm,
        parameters_billion: 72.0,
        energy_per_million_tokens_kwh: 0.90,
        default_gpu: "nvidia-a100-80gb",
        gpu_count_inference: 2,
        tokens_per_second_per_gpu: 75,
        quality_score: 82,
        training_energy_mwh: 7000.0,
        training_co2e_tons: 2380.0,
    },
    ModelSeed {
        slug: "dbrx",
        display_name: "DBRX 132B (Databricks, MoE)",
        family: "dbrx",
        category: ModelCategory::MidSizeLlm,
        parameters_billion: 132.0,
        energy_per_million_tokens_kwh: 1.10,
        default_gpu: "nvidia-a100-80gb",
        gpu_count_inference: 4,
        tokens_per_second_per_gpu: 60,
        quality_score: 78,
        training_energy_mwh: 9000.0,
        training_co2e_tons: 3060.0,
    },
    ModelSeed {
        slug: "phi-3-medium",
        display_name: "Phi-3 Medium 14B (Microsoft)",
        family: "phi-3-medium",
        category: ModelCategory::SmallEdge,
        parameters_billion: 14.0,
        energy_per_million_tokens_kwh: 0.18,
        default_gpu: "nvidia-a10g",
        gpu_count_inference: 1,
        tokens_per_second_per_gpu: 130,
        quality_score: 71,
        training_energy_mwh: 1400.0,
        training_co2e_tons: 476.0,
    },
    ModelSeed {
        slug: "command-r-plus",
        display_name: "Command R+ (Cohere, 104B)",
        family: "command-r-plus",
        category: ModelCategory::MidSizeLlm,
        parameters_billion: 104.0,
        energy_per_million_tokens_kwh: 1.50,
        default_gpu: "nvidia-a100-80gb",
        gpu_count_inference: 2,
        tokens_per_second_per_gpu: 65,
        quality_score: 83,
        training_energy_mwh: 8500.0,
        training_co2e_tons: 2890.0,
    },
    ModelSeed {
        slug: "gemma-7b",
        display_name: "Gemma 2 9B (Google, open)",
        family: "gemma-7b",
        category: ModelCategory::SmallEdge,
        parameters_billion: 9.0,
        energy_per_million_tokens_kwh: 0.06,
        default_gpu: "nvidia-t4",
        gpu_count_inference: 1,
        tokens_per_second_per_gpu: 170,
        quality_score: 64,
        training_energy_mwh: 600.0,
        training_co2e_tons: 204.0,
    },
];

// ---------------------------------------------------------------------------
// Public accessors
// ---------------------------------------------------------------------------

/// Predefined GPU profiles.
pub fn predefined_gpus() -> Vec<GpuProfile> {
    GPUS.iter()
        .map(|g| GpuProfile {
            id: g.id.to_string(),
            name: g.name.to_string(),
            tdp_watts: g.tdp_watts,
            typical_utilization: g.typical_utilization,
            memory_gb: g.memory_gb,
            flops_teraflops: g.flops_teraflops,
            embodied_carbon_kg_co2e: g.embodied_carbon_kg_co2e,
            expected_lifespan_hours: g.expected_lifespan_hours,
            water_cooling_liters_per_hour: g.water_cooling_liters_per_hour,
        })
        .collect()
}

/// Predefined grid carbon-intensity profiles.
pub fn predefined_grids() -> Vec<GridProfile> {
    GRIDS
        .iter()
        .map(|g| GridProfile {
            region_id: g.region_id.to_string(),
            provider: g.provider.to_string(),
            location: g.location.to_string(),
            gco2e_per_kwh: g.gco2e_per_kwh,
            source: g.source.to_string(),
            year: GRID_DATA_YEAR,
            renewable_percentage: g.renewable_percentage,
        })
        .collect()
}

/// Predefined model profiles.
///
/// The slug doubles as the id here; storage backends assign their own ids
/// when seeding.
pub fn predefined_models() -> Vec<ModelProfile> {
    MODELS
        .iter()
        .map(|m| ModelProfile {
            id: m.slug.to_string(),
            slug: m.slug.to_string(),
            display_name: m.display_name.to_string(),
            family: m.family.to_string(),
            category: m.category,
            parameters_billion: m.parameters_billion,
            energy_per_million_tokens_kwh: m.energy_per_million_tokens_kwh,
            default_gpu: m.default_gpu.to_string(),
            gpu_count_inference: m.gpu_count_inference,
            tokens_per_second_per_gpu: m.tokens_per_second_per_gpu,
            quality_score: m.quality_score,
            training_energy_mwh: Some(m.training_energy_mwh),
            training_co2e_tons: Some(m.training_co2e_tons),
            description: None,
            is_predefined: true,
            is_active: true,
        })
        .collect()
}

/// A catalog containing every predefined profile.
pub fn predefined_catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    for gpu in predefined_gpus() {
        catalog.insert_gpu(gpu);
    }
    for grid in predefined_grids() {
        catalog.insert_grid(grid);
    }
    for model in predefined_models() {
        catalog.insert_model(model);
    }
    catalog
}
