// src/store/seed.rs

use chrono::{Datelike, Days, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    auth::User,
    crm::{Customer, Vendor, VendorKind},
    finance::Expense,
    grn::{format_document_number, GoodsReceipt},
    inventory::{MaintenanceCost, Vehicle, VehicleCondition, VehicleSpecs, VehicleStatus},
    notification::{Notification, NotificationKind, NotificationPriority},
    rbac::Role,
    sales::{PaymentMethod, Sale, SaleStatus},
};

// Conjunto inicial de dados. É para cá que o sistema volta a cada
// reinício: nenhuma entidade sobrevive ao processo.
pub struct SeedData {
    pub users: Vec<User>,
    pub vehicles: Vec<Vehicle>,
    pub receipts: Vec<GoodsReceipt>,
    pub sales: Vec<Sale>,
    pub customers: Vec<Customer>,
    pub vendors: Vec<Vendor>,
    pub expenses: Vec<Expense>,
    pub notifications: Vec<Notification>,
}

pub fn seed_data() -> anyhow::Result<SeedData> {
    let now = Utc::now();
    let today = now.date_naive();

    // --- Usuários ---
    // As senhas do seed são de desenvolvimento; o hash é gerado no boot
    // para nunca existir segredo em claro no binário além destas contas
    // de demonstração.
    let owner_id = Uuid::new_v4();
    let admin_id = Uuid::new_v4();
    let staff_id = Uuid::new_v4();

    let users = vec![
        User {
            id: owner_id,
            name: "Roberto Polacchini".into(),
            email: "dono@revenda.com.br".into(),
            password_hash: bcrypt::hash("dono123", bcrypt::DEFAULT_COST)?,
            role: Role::Owner,
            is_active: true,
            sales_target: None,
            commission_rate: None,
            created_at: now,
            updated_at: now,
        },
        User {
            id: admin_id,
            name: "Carla Menezes".into(),
            email: "admin@revenda.com.br".into(),
            password_hash: bcrypt::hash("admin123", bcrypt::DEFAULT_COST)?,
            role: Role::Admin,
            is_active: true,
            sales_target: None,
            commission_rate: None,
            created_at: now,
            updated_at: now,
        },
        User {
            id: staff_id,
            name: "Jonas Ferreira".into(),
            email: "vendas@revenda.com.br".into(),
            password_hash: bcrypt::hash("vendas123", bcrypt::DEFAULT_COST)?,
            role: Role::Staff,
            is_active: true,
            sales_target: Some(Decimal::from(300_000)),
            commission_rate: Some(Decimal::new(15, 3)), // 1,5%
            created_at: now,
            updated_at: now,
        },
    ];

    // --- Fornecedores ---
    let vendor_leasing = Uuid::new_v4();
    let vendor_individual = Uuid::new_v4();
    let vendor_auction = Uuid::new_v4();

    let vendors = vec![
        Vendor {
            id: vendor_leasing,
            name: "LocaSul Frotas".into(),
            kind: VendorKind::Leasing,
            contact_person: Some("Paulo Andrade".into()),
            email: Some("frotas@locasul.com.br".into()),
            phone: Some("+55 11 4002-8922".into()),
            address: Some("Av. Marginal, 1200 - São Paulo/SP".into()),
            rating: 4,
            created_at: now,
            updated_at: now,
        },
        Vendor {
            id: vendor_individual,
            name: "Marcos Tanaka".into(),
            kind: VendorKind::Individual,
            contact_person: None,
            email: None,
            phone: Some("+55 11 98888-1010".into()),
            address: None,
            rating: 5,
            created_at: now,
            updated_at: now,
        },
        Vendor {
            id: vendor_auction,
            name: "Leilões Bandeirantes".into(),
            kind: VendorKind::Auction,
            contact_person: Some("Setor de liberação".into()),
            email: Some("contato@leiloesband.com.br".into()),
            phone: None,
            address: Some("Rod. Anhanguera km 22".into()),
            rating: 3,
            created_at: now,
            updated_at: now,
        },
    ];

    // --- Clientes ---
    let customer_ana = Uuid::new_v4();
    let customer_bruno = Uuid::new_v4();

    let customers = vec![
        Customer {
            id: customer_ana,
            full_name: "Ana Beatriz Castro".into(),
            email: Some("ana.castro@example.com".into()),
            phone: Some("+55 11 97777-2020".into()),
            document_number: Some("123.456.789-00".into()),
            address: Some("Rua das Figueiras, 85 - Santo André/SP".into()),
            created_at: now,
            updated_at: now,
        },
        Customer {
            id: customer_bruno,
            full_name: "Bruno Said".into(),
            email: Some("bruno.said@example.com".into()),
            phone: Some("+55 11 96666-3030".into()),
            document_number: None,
            address: None,
            created_at: now,
            updated_at: now,
        },
        Customer {
            id: Uuid::new_v4(),
            full_name: "Débora Lins".into(),
            email: None,
            phone: Some("+55 19 95555-4040".into()),
            document_number: Some("987.654.321-00".into()),
            address: Some("Av. Norte-Sul, 300 - Campinas/SP".into()),
            created_at: now,
            updated_at: now,
        },
    ];

    // --- Veículos ---
    let corolla_id = Uuid::new_v4();
    let hb20_id = Uuid::new_v4();
    let compass_id = Uuid::new_v4();
    let onix_id = Uuid::new_v4();
    let civic_id = Uuid::new_v4();

    let corolla_maintenance = vec![MaintenanceCost {
        id: Uuid::new_v4(),
        description: "Troca de pneus e alinhamento".into(),
        cost: Decimal::from(2_400),
        date: today - Days::new(50),
    }];
    let compass_maintenance = vec![
        MaintenanceCost {
            id: Uuid::new_v4(),
            description: "Revisão dos 60 mil".into(),
            cost: Decimal::from(1_900),
            date: today - Days::new(20),
        },
        MaintenanceCost {
            id: Uuid::new_v4(),
            description: "Polimento e higienização".into(),
            cost: Decimal::from(650),
            date: today - Days::new(12),
        },
    ];

    let mut vehicles = vec![
        Vehicle {
            id: corolla_id,
            specs: VehicleSpecs {
                brand: "Toyota".into(),
                model: "Corolla XEi".into(),
                year: 2021,
                color: "Prata".into(),
                mileage_km: 48_500,
                engine: "2.0".into(),
                fuel: "Flex".into(),
                transmission: "Automático CVT".into(),
                seats: 5,
                doors: 4,
                vin: "9BRBL3HE1M0212345".into(),
                plate: "FQX1A23".into(),
            },
            purchase_price: Decimal::from(98_000),
            maintenance_costs: corolla_maintenance,
            selling_price: Decimal::from(114_900),
            cost_basis: Decimal::ZERO, // recalculado abaixo
            status: VehicleStatus::Sold,
            condition: VehicleCondition::Excellent,
            created_at: now - chrono::Duration::days(75),
            updated_at: now,
        },
        Vehicle {
            id: hb20_id,
            specs: VehicleSpecs {
                brand: "Hyundai".into(),
                model: "HB20 Comfort".into(),
                year: 2020,
                color: "Branco".into(),
                mileage_km: 61_000,
                engine: "1.0".into(),
                fuel: "Flex".into(),
                transmission: "Manual".into(),
                seats: 5,
                doors: 4,
                vin: "9BHBG51CAKP067890".into(),
                plate: "EGT4B56".into(),
            },
            purchase_price: Decimal::from(52_000),
            maintenance_costs: vec![],
            selling_price: Decimal::from(61_500),
            cost_basis: Decimal::ZERO,
            status: VehicleStatus::Reserved,
            condition: VehicleCondition::Good,
            created_at: now - chrono::Duration::days(35),
            updated_at: now,
        },
        Vehicle {
            id: compass_id,
            specs: VehicleSpecs {
                brand: "Jeep".into(),
                model: "Compass Longitude".into(),
                year: 2022,
                color: "Preto".into(),
                mileage_km: 33_000,
                engine: "1.3 Turbo".into(),
                fuel: "Flex".into(),
                transmission: "Automático".into(),
                seats: 5,
                doors: 4,
                vin: "98876543210FF1122".into(),
                plate: "RZK7C89".into(),
            },
            purchase_price: Decimal::from(118_000),
            maintenance_costs: compass_maintenance,
            selling_price: Decimal::from(134_900),
            cost_basis: Decimal::ZERO,
            status: VehicleStatus::Available,
            condition: VehicleCondition::Excellent,
            created_at: now - chrono::Duration::days(25),
            updated_at: now,
        },
        Vehicle {
            id: onix_id,
            specs: VehicleSpecs {
                brand: "Chevrolet".into(),
                model: "Onix LT".into(),
                year: 2019,
                color: "Vermelho".into(),
                mileage_km: 74_200,
                engine: "1.0".into(),
                fuel: "Flex".into(),
                transmission: "Manual".into(),
                seats: 5,
                doors: 4,
                vin: "9BGKS48T0KG334455".into(),
                plate: "DPE2D34".into(),
            },
            purchase_price: Decimal::from(43_500),
            maintenance_costs: vec![],
            selling_price: Decimal::from(51_900),
            cost_basis: Decimal::ZERO,
            status: VehicleStatus::Maintenance,
            condition: VehicleCondition::Fair,
            created_at: now - chrono::Duration::days(100),
            updated_at: now,
        },
        Vehicle {
            id: civic_id,
            specs: VehicleSpecs {
                brand: "Honda".into(),
                model: "Civic EXL".into(),
                year: 2020,
                color: "Cinza".into(),
                mileage_km: 55_800,
                engine: "2.0".into(),
                fuel: "Flex".into(),
                transmission: "Automático CVT".into(),
                seats: 5,
                doors: 4,
                vin: "93HFC2650LZ556677".into(),
                plate: "GHJ5E67".into(),
            },
            purchase_price: Decimal::from(92_000),
            maintenance_costs: vec![],
            selling_price: Decimal::from(104_900),
            cost_basis: Decimal::ZERO,
            status: VehicleStatus::Available,
            condition: VehicleCondition::Good,
            created_at: now - chrono::Duration::days(8),
            updated_at: now,
        },
    ];

    for vehicle in &mut vehicles {
        vehicle.recompute_cost_basis();
    }

    // --- Notas de entrada ---
    // Uma nota por veículo do pátio, na ordem de chegada.
    let grn_year = today.year();
    let vehicle_intakes = [
        (onix_id, vendor_auction, Decimal::from(43_500), 100u64),
        (corolla_id, vendor_leasing, Decimal::from(98_000), 75),
        (hb20_id, vendor_individual, Decimal::from(52_000), 35),
        (compass_id, vendor_leasing, Decimal::from(118_000), 25),
        (civic_id, vendor_individual, Decimal::from(92_000), 8),
    ];
    let receipts = vehicle_intakes
        .iter()
        .enumerate()
        .map(|(i, (vehicle_id, vendor_id, price, days_ago))| GoodsReceipt {
            id: Uuid::new_v4(),
            document_number: format_document_number(grn_year, (i + 1) as u32),
            vehicle_id: *vehicle_id,
            vendor_id: *vendor_id,
            purchase_price: *price,
            received_at: today - Days::new(*days_ago),
            notes: None,
            created_at: now,
        })
        .collect::<Vec<_>>();

    // --- Vendas ---
    // O Corolla já saiu (venda concluída, custo fotografado na conclusão);
    // o HB20 está reservado com venda pendente.
    let corolla_cost_basis = Decimal::from(98_000) + Decimal::from(2_400);
    let sales = vec![
        Sale {
            id: Uuid::new_v4(),
            vehicle_id: corolla_id,
            customer_id: customer_ana,
            sold_by: Some(staff_id),
            selling_price: Decimal::from(112_500),
            down_payment: None,
            payment_method: PaymentMethod::Transfer,
            status: SaleStatus::Completed,
            sale_date: today - Days::new(15),
            cost_of_goods: Some(corolla_cost_basis),
            created_at: now - chrono::Duration::days(15),
            updated_at: now - chrono::Duration::days(15),
        },
        Sale {
            id: Uuid::new_v4(),
            vehicle_id: hb20_id,
            customer_id: customer_bruno,
            sold_by: Some(staff_id),
            selling_price: Decimal::from(60_000),
            down_payment: Some(Decimal::from(10_000)),
            payment_method: PaymentMethod::Financing,
            status: SaleStatus::Pending,
            sale_date: today - Days::new(2),
            cost_of_goods: None,
            created_at: now - chrono::Duration::days(2),
            updated_at: now - chrono::Duration::days(2),
        },
    ];

    // --- Despesas ---
    let expenses = vec![
        Expense {
            id: Uuid::new_v4(),
            description: "Aluguel do pátio".into(),
            category: "Estrutura".into(),
            amount: Decimal::from(7_500),
            expense_date: today - Days::new(20),
            created_at: now,
        },
        Expense {
            id: Uuid::new_v4(),
            description: "Anúncios em portais".into(),
            category: "Marketing".into(),
            amount: Decimal::from(1_800),
            expense_date: today - Days::new(10),
            created_at: now,
        },
        Expense {
            id: Uuid::new_v4(),
            description: "Transferências e vistorias".into(),
            category: "Documentação".into(),
            amount: Decimal::from(940),
            expense_date: today - Days::new(5),
            created_at: now,
        },
    ];

    // --- Notificações ---
    let notifications = vec![
        Notification {
            id: Uuid::new_v4(),
            kind: NotificationKind::Sales,
            priority: NotificationPriority::High,
            title: "Venda concluída".into(),
            message: "Corolla XEi 2021 vendido para Ana Beatriz Castro.".into(),
            is_read: false,
            related_id: Some(sales[0].id.to_string()),
            link: None,
            created_at: now - chrono::Duration::days(15),
        },
        Notification {
            id: Uuid::new_v4(),
            kind: NotificationKind::Stock,
            priority: NotificationPriority::Medium,
            title: "Veículo em manutenção".into(),
            message: "Onix LT 2019 aguardando reparo da suspensão.".into(),
            is_read: false,
            related_id: Some(onix_id.to_string()),
            link: None,
            created_at: now - chrono::Duration::days(4),
        },
        Notification {
            id: Uuid::new_v4(),
            kind: NotificationKind::System,
            priority: NotificationPriority::Low,
            title: "Bem-vindo".into(),
            message: "Dados de demonstração carregados.".into(),
            is_read: true,
            related_id: None,
            link: None,
            created_at: now,
        },
    ];

    Ok(SeedData {
        users,
        vehicles,
        receipts,
        sales,
        customers,
        vendors,
        expenses,
        notifications,
    })
}
