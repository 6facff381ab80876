use anyhow::Result;
use execlog_intercept::{CallSite, Interceptor, LogOptions, MemorySink, log_execution};
use execlog_mask::LogMask;

#[derive(LogMask)]
struct Customer {
    #[mask(pattern = "name")]
    name: String,
    #[mask(pattern = "email")]
    email: String,
    #[mask(pattern = "document")]
    document: String,
    #[mask(pattern = "telephone")]
    phone: String,
    vip: bool,
}

struct CustomerService;

impl CustomerService {
    #[log_execution]
    fn register(&self, customer: Customer) -> Customer {
        customer
    }

    #[log_execution(log_return = false)]
    fn score(&self, customer_id: u64) -> u32 {
        (customer_id % 1000) as u32
    }

    #[log_execution]
    async fn lookup(&self, email: String) -> Option<String> {
        email.split('@').nth(1).map(str::to_string)
    }
}

pub async fn handle() -> Result<()> {
    let service = CustomerService;

    let customer = service.register(Customer {
        name: "John Doe".to_string(),
        email: "john.doe@gmail.com".to_string(),
        document: "12345678911".to_string(),
        phone: "99999-9999".to_string(),
        vip: true,
    });
    service.score(42);
    service.lookup(customer.email.clone()).await;

    // Same calls, collected instead of logged
    let sink = MemorySink::new();
    let interceptor = Interceptor::new(sink.clone());
    let site = CallSite::new("score", "CustomerService").arg(&42_u64);
    interceptor.intercept(&site, LogOptions::new(false, true), || service.score(42));

    println!("Records collected in memory:");
    for record in sink.records() {
        println!("  {}", record);
    }
    println!("Registered customer: {}", customer.render()?);

    Ok(())
}
