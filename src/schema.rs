//! Supply-chain tables read by the metric catalog.
//!
//! The analytics never write; this DDL exists for the demo seeder and for
//! tests. It is accepted by both MySQL and SQLite.

/// Creates the twelve source tables if missing
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS Region (
    Region_ID INT PRIMARY KEY,
    Name VARCHAR(100) NOT NULL
);

CREATE TABLE IF NOT EXISTS Sales_Representative (
    Representative_ID INT PRIMARY KEY,
    Name VARCHAR(100) NOT NULL,
    Region_ID INT NOT NULL REFERENCES Region (Region_ID),
    Performance_Rating DECIMAL(3, 1)
);

CREATE TABLE IF NOT EXISTS Customer (
    Customer_ID INT PRIMARY KEY,
    Name VARCHAR(100) NOT NULL
);

CREATE TABLE IF NOT EXISTS Doctors (
    Customer_ID INT PRIMARY KEY REFERENCES Customer (Customer_ID),
    Specialization VARCHAR(100)
);

CREATE TABLE IF NOT EXISTS Hospital (
    Customer_ID INT PRIMARY KEY REFERENCES Customer (Customer_ID),
    Bed_Count INT
);

CREATE TABLE IF NOT EXISTS Pharmacy (
    Customer_ID INT PRIMARY KEY REFERENCES Customer (Customer_ID),
    License_Number VARCHAR(50)
);

CREATE TABLE IF NOT EXISTS Product (
    Product_ID INT PRIMARY KEY,
    Name VARCHAR(100) NOT NULL,
    Category VARCHAR(50),
    Price DECIMAL(10, 2) NOT NULL
);

CREATE TABLE IF NOT EXISTS Inventory (
    Inventory_ID INT PRIMARY KEY,
    Product_ID INT NOT NULL REFERENCES Product (Product_ID),
    Quantity INT NOT NULL,
    Reorder_Level INT NOT NULL,
    Location VARCHAR(100)
);

CREATE TABLE IF NOT EXISTS Orders (
    Order_ID INT PRIMARY KEY,
    Representative_ID INT REFERENCES Sales_Representative (Representative_ID),
    Date DATE NOT NULL,
    Total_cost DECIMAL(12, 2) NOT NULL,
    Order_Status VARCHAR(20) NOT NULL
);

CREATE TABLE IF NOT EXISTS Order_Placed (
    Customer_ID INT NOT NULL REFERENCES Customer (Customer_ID),
    Order_ID INT NOT NULL REFERENCES Orders (Order_ID),
    PRIMARY KEY (Customer_ID, Order_ID)
);

CREATE TABLE IF NOT EXISTS Involvement (
    Order_ID INT NOT NULL REFERENCES Orders (Order_ID),
    Product_ID INT NOT NULL REFERENCES Product (Product_ID),
    Quantity_Ordered INT NOT NULL,
    Line_Total DECIMAL(12, 2) NOT NULL,
    PRIMARY KEY (Order_ID, Product_ID)
);

CREATE TABLE IF NOT EXISTS Interaction (
    Interaction_ID INT PRIMARY KEY,
    Representative_ID INT NOT NULL REFERENCES Sales_Representative (Representative_ID),
    Customer_ID INT NOT NULL REFERENCES Customer (Customer_ID),
    Interaction_Date DATE,
    Notes VARCHAR(255)
);
"#;

/// Small, internally consistent data set covering every dashboard panel
pub const DEMO_DATA_SQL: &str = r#"
INSERT INTO Region (Region_ID, Name) VALUES
    (1, 'North'), (2, 'South'), (3, 'East'), (4, 'West'), (5, 'Central');

INSERT INTO Sales_Representative (Representative_ID, Name, Region_ID, Performance_Rating) VALUES
    (1, 'Priya Raman', 1, 4.6),
    (2, 'Daniel Ortiz', 1, 3.9),
    (3, 'Mei Chen', 2, 4.2),
    (4, 'Samuel Okafor', 3, 3.4),
    (5, 'Hannah Weber', 4, 4.8),
    (6, 'Arjun Mehta', 4, NULL);

INSERT INTO Customer (Customer_ID, Name) VALUES
    (1, 'Dr. Alice Moreau'),
    (2, 'Dr. Kwame Mensah'),
    (3, 'Dr. Lena Fischer'),
    (4, 'St. Mary General'),
    (5, 'Riverside Medical Center'),
    (6, 'Northgate Clinic Hospital'),
    (7, 'CityCare Pharmacy'),
    (8, 'GreenLeaf Chemists'),
    (9, 'Harbor Drugstore'),
    (10, 'Wellness Distributors');

INSERT INTO Doctors (Customer_ID, Specialization) VALUES
    (1, 'Cardiology'), (2, 'Pediatrics'), (3, 'Oncology');

INSERT INTO Hospital (Customer_ID, Bed_Count) VALUES
    (3, 40), (4, 320), (5, 210), (6, 95);

INSERT INTO Pharmacy (Customer_ID, License_Number) VALUES
    (6, 'PH-2291'), (7, 'PH-1044'), (8, 'PH-3310'), (9, 'PH-0872');

INSERT INTO Product (Product_ID, Name, Category, Price) VALUES
    (1, 'Amoxicillin 500mg', 'Antibiotic', 12.50),
    (2, 'Atorvastatin 20mg', 'Cardiovascular', 18.75),
    (3, 'Metformin 850mg', 'Diabetes', 9.40),
    (4, 'Insulin Glargine', 'Diabetes', 64.00),
    (5, 'Ibuprofen 400mg', 'Analgesic', 4.25),
    (6, 'Influenza Vaccine', 'Vaccine', 22.00),
    (7, 'Omeprazole 20mg', 'Gastrointestinal', 7.80),
    (8, 'Salbutamol Inhaler', 'Respiratory', 15.60);

INSERT INTO Inventory (Inventory_ID, Product_ID, Quantity, Reorder_Level, Location) VALUES
    (1, 1, 450, 200, 'Warehouse A'),
    (2, 2, 55, 200, 'Warehouse A'),
    (3, 3, 110, 200, 'Warehouse B'),
    (4, 4, 0, 50, 'Cold Store 1'),
    (5, 5, 900, 300, 'Warehouse B'),
    (6, 6, 180, 150, 'Cold Store 2'),
    (7, 7, 140, 160, 'Warehouse C'),
    (8, 8, 30, 100, 'Warehouse C');

INSERT INTO Orders (Order_ID, Representative_ID, Date, Total_cost, Order_Status) VALUES
    (1, 1, '2024-01-15', 1250.00, 'Delivered'),
    (2, 1, '2024-02-03', 3400.00, 'Delivered'),
    (3, 2, '2024-02-11', 875.50, 'Shipped'),
    (4, 3, '2024-02-20', 2190.00, 'Delivered'),
    (5, 3, '2024-03-02', 640.00, 'Cancelled'),
    (6, 4, '2024-03-09', 1520.25, 'Processing'),
    (7, 5, '2024-03-15', 4780.00, 'Delivered'),
    (8, 5, '2024-04-01', 1960.00, 'Delivered'),
    (9, 1, '2024-04-12', 720.00, 'Shipped'),
    (10, 2, '2024-04-20', 5100.00, 'Cancelled'),
    (11, 4, '2024-05-05', 980.00, 'Delivered'),
    (12, 5, '2024-05-18', 2300.00, 'Pending');

INSERT INTO Order_Placed (Customer_ID, Order_ID) VALUES
    (1, 1), (4, 2), (7, 3), (5, 4), (2, 5), (8, 6),
    (4, 7), (3, 8), (9, 9), (6, 10), (10, 11), (5, 12);

INSERT INTO Involvement (Order_ID, Product_ID, Quantity_Ordered, Line_Total) VALUES
    (1, 1, 60, 750.00), (1, 5, 117, 500.00),
    (2, 4, 40, 2560.00), (2, 2, 45, 840.00),
    (3, 7, 60, 468.00), (3, 5, 96, 407.50),
    (4, 6, 60, 1320.00), (4, 8, 55, 870.00),
    (5, 3, 68, 640.00),
    (6, 2, 45, 843.75), (6, 3, 72, 676.50),
    (7, 4, 60, 3840.00), (7, 6, 42, 940.00),
    (8, 1, 80, 1000.00), (8, 8, 61, 960.00),
    (9, 7, 50, 390.00), (9, 5, 78, 330.00),
    (10, 4, 80, 5100.00),
    (11, 3, 60, 564.00), (11, 5, 98, 416.00),
    (12, 2, 80, 1500.00), (12, 8, 51, 800.00);

INSERT INTO Interaction
    (Interaction_ID, Representative_ID, Customer_ID, Interaction_Date, Notes) VALUES
    (1, 1, 1, '2024-01-10', 'Product briefing'),
    (2, 1, 4, '2024-01-28', 'Contract review'),
    (3, 1, 9, '2024-04-02', 'Restock visit'),
    (4, 2, 7, '2024-02-05', 'Introductory call'),
    (5, 3, 5, '2024-02-14', 'Formulary meeting'),
    (6, 3, 2, '2024-02-27', 'Sample drop-off'),
    (7, 4, 8, '2024-03-01', 'Pricing discussion'),
    (8, 4, 10, '2024-04-28', 'Distribution terms'),
    (9, 5, 4, '2024-03-10', 'Quarterly review'),
    (10, 5, 3, '2024-03-25', 'Clinical update'),
    (11, 5, 5, '2024-05-10', 'Follow-up'),
    (12, 6, 6, '2024-05-12', 'Territory handover');
"#;

/// Splits a script into its non-empty statements
pub fn statements(script: &str) -> impl Iterator<Item = &str> {
    script.split(';').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_covers_every_source_table() {
        let creates = statements(SCHEMA_SQL)
            .filter(|s| s.starts_with("CREATE TABLE"))
            .count();
        assert_eq!(creates, 12);
    }

    #[test]
    fn demo_data_has_no_embedded_separators() {
        // every statement must be a complete INSERT
        assert!(statements(DEMO_DATA_SQL).all(|s| s.starts_with("INSERT INTO")));
    }
}
